use approx::assert_relative_eq;
use cube_timer::io::{solves_from_csv, solves_to_csv};
use cube_timer::timer::Stopwatch;
use cube_timer::{
    best_rolling_average, compute_stats, effective_time, filter_solves, format_average,
    format_time, generate_scramble, mean, rolling_average, CubeType, Penalty, Session, Solve,
};

fn solve(time: u32, penalty: Option<Penalty>) -> Solve {
    Solve::new("3x3", time, "R U R' U'", "Default").with_penalty(penalty)
}

#[test]
fn ao5_with_one_dnf_trims_it_as_worst() {
    let history = vec![
        solve(1000, None),
        solve(2000, None),
        solve(3000, None),
        solve(4000, None),
        solve(4500, Some(Penalty::Dnf)),
    ];
    assert_relative_eq!(rolling_average(&history, 5).unwrap(), 3000.0);
    assert_eq!(rolling_average(&history[..4], 5), None);
}

#[test]
fn ao5_with_two_dnfs_is_void() {
    let history = vec![
        solve(1000, None),
        solve(2000, Some(Penalty::Dnf)),
        solve(3000, None),
        solve(4000, Some(Penalty::Dnf)),
        solve(5000, None),
    ];
    assert_eq!(rolling_average(&history, 5), None);
    assert_relative_eq!(mean(&history).unwrap(), 3000.0);
}

#[test]
fn best_ao5_over_ten_solves_is_min_of_six_windows() {
    let times = [12_000, 9_500, 11_200, 10_100, 8_800, 13_400, 9_900, 10_600, 9_200, 11_800];
    let mut history: Vec<Solve> = times.iter().map(|&t| solve(t, None)).collect();
    history[5] = history[5].clone().with_penalty(Some(Penalty::Dnf));

    let windows: Vec<f64> = (0..6)
        .filter_map(|start| rolling_average(&history[start..start + 5], 5))
        .collect();
    assert_eq!(windows.len(), 6);
    let expected = windows.iter().copied().fold(f64::INFINITY, f64::min);
    assert_relative_eq!(best_rolling_average(&history, 5).unwrap(), expected);
}

#[test]
fn effective_time_is_stable() {
    let s = solve(1000, Some(Penalty::PlusTwo));
    assert_eq!(effective_time(&s), 3000.0);
    assert_eq!(effective_time(&s), effective_time(&s));
    assert!(effective_time(&solve(1000, Some(Penalty::Dnf))).is_infinite());
}

#[test]
fn formatting_matches_timer_display() {
    assert_eq!(format_time(65_432, None), "1:05.43");
    assert_eq!(format_time(5_432, Some(Penalty::PlusTwo)), "5.43+");
    assert_eq!(format_time(1, Some(Penalty::Dnf)), "DNF");
    assert_eq!(format_average(rolling_average(&[], 5)), "-");
}

#[test]
fn three_by_three_scramble_has_twenty_moves() {
    for _ in 0..20 {
        assert_eq!(generate_scramble("3x3").split(' ').count(), 20);
    }
}

#[test]
fn session_workflow() {
    let practice = Session::new("Practice");
    let mut history = Vec::new();
    let mut watch = Stopwatch::new();

    for (i, ms) in [11_000.0, 9_000.0, 10_000.0, 12_000.0, 8_000.0].into_iter().enumerate() {
        let start = i as f64 * 100_000.0;
        watch.start_at(start).unwrap();
        watch.stop_at(start + ms).unwrap();
        let scramble = generate_scramble(CubeType::ThreeByThree);
        history.push(watch.finish("3x3", scramble, practice.id.clone()).unwrap());
    }
    history.push(Solve::new("2x2", 3_000, "R U F", practice.id.clone()));

    let three = filter_solves(&history, &CubeType::ThreeByThree, &practice.id);
    let stats = compute_stats(&three);
    assert_eq!(stats.count, 5);
    assert_eq!(stats.best, Some(8_000.0));
    assert_eq!(stats.worst, Some(12_000.0));
    assert_relative_eq!(stats.ao5.unwrap(), 10_000.0);

    let restored = solves_from_csv(&solves_to_csv(&history).unwrap()).unwrap();
    assert_eq!(restored, history);
}
