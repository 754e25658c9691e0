use fractal_pulse::palette::{luminance, step_morph, ColorTable, PaletteMorphState};

const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
const WHITE: [f32; 3] = [255.0, 255.0, 255.0];

#[test]
fn two_point_table_is_a_monotone_ramp() {
    let table = ColorTable::from_control_points(&[BLACK, WHITE], 8);
    assert_eq!(table.len(), 8);
    assert_eq!(table.colors()[0], BLACK);
    assert_eq!(table.colors()[7], WHITE);
    for pair in table.colors().windows(2) {
        assert!(luminance(pair[0]) < luminance(pair[1]));
    }
}

#[test]
fn control_points_are_sorted_by_luminance() {
    // Shuffled input still yields a dark-to-light table.
    let mid = [128.0, 128.0, 128.0];
    let table = ColorTable::from_control_points(&[WHITE, BLACK, mid], 9);
    assert_eq!(table.colors()[0], BLACK);
    assert_eq!(table.colors()[8], WHITE);
}

#[test]
fn segment_lengths_partition_the_table_exactly() {
    // 3 control points -> 2 segments; 7 slots split 4 + 3.
    let mid = [100.0, 100.0, 100.0];
    let table = ColorTable::from_control_points(&[BLACK, mid, WHITE], 7);
    assert_eq!(table.len(), 7);
    // First segment ends on the middle point, second starts there too.
    assert_eq!(table.colors()[3], mid);
    assert_eq!(table.colors()[4], mid);
}

#[test]
fn morph_converges_exactly_and_never_overshoots() {
    let mut current = ColorTable::from_control_points(&[BLACK, BLACK], 4);
    let target = ColorTable::from_control_points(&[WHITE, WHITE], 4);
    let steps = 10u32;
    let mut previous = vec![0.0_f32; 4];
    for remaining in (1..=steps).rev() {
        step_morph(&mut current, &target, remaining);
        for (i, color) in current.colors().iter().enumerate() {
            assert!(color[0] <= 255.0, "overshoot at entry {i}");
            assert!(color[0] >= previous[i], "regression at entry {i}");
            previous[i] = color[0];
        }
    }
    assert_eq!(current, target);
}

#[test]
fn morph_state_rotates_targets_when_steps_run_out() {
    let tables = vec![
        ColorTable::from_control_points(&[BLACK, WHITE], 4),
        ColorTable::from_control_points(&[BLACK, [255.0, 0.0, 0.0]], 4),
        ColorTable::from_control_points(&[BLACK, [0.0, 0.0, 255.0]], 4),
    ];
    let morph_steps = 5;
    let mut morph = PaletteMorphState::new(tables, morph_steps);
    assert_eq!(morph.target_index(), 1);

    // Burn through the first morph; the counter hits zero, then the next
    // tick advances the target and resets the budget.
    for _ in 0..morph_steps {
        morph.tick();
    }
    assert_eq!(morph.steps_remaining(), 0);
    morph.tick();
    assert_eq!(morph.target_index(), 2);
    assert_eq!(morph.steps_remaining(), morph_steps - 1);
}

#[test]
fn completed_morph_reaches_its_target_table() {
    let start = ColorTable::from_control_points(&[BLACK, BLACK], 6);
    let goal = ColorTable::from_control_points(&[[10.0, 200.0, 55.0], [10.0, 200.0, 55.0]], 6);
    let mut morph = PaletteMorphState::new(vec![start, goal.clone()], 8);
    for _ in 0..8 {
        morph.tick();
    }
    assert_eq!(morph.current_table(), &goal);
}
