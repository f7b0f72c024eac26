use genremap::stats::*;

fn labels(counts: &[(&str, usize)]) -> Vec<String> {
    counts
        .iter()
        .flat_map(|(label, count)| std::iter::repeat_n(label.to_string(), *count))
        .collect()
}

#[test]
fn test_jenks_breaks_three_groups() {
    let values = vec![1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 20.0, 21.0, 22.0];
    let bounds = jenks_breaks(&values, 3).unwrap();
    assert_eq!(bounds, vec![1.0, 3.0, 12.0, 22.0]);
}

#[test]
fn test_jenks_breaks_unsorted_input() {
    let values = vec![21.0, 1.0, 12.0, 3.0, 20.0, 10.0, 2.0, 22.0, 11.0];
    assert_eq!(jenks_breaks(&values, 3).unwrap(), vec![1.0, 3.0, 12.0, 22.0]);
}

#[test]
fn test_jenks_breaks_infeasible() {
    assert!(matches!(
        jenks_breaks(&[1.0, 2.0, 3.0], 3),
        Err(StatsError::InfeasibleBreaks { .. })
    ));
    assert!(matches!(
        jenks_breaks(&[1.0, 2.0, 3.0], 1),
        Err(StatsError::InfeasibleBreaks { .. })
    ));
    // Ties leave no room for a third class
    assert!(matches!(
        jenks_breaks(&[4.0, 4.0, 4.0, 4.0], 3),
        Err(StatsError::InfeasibleBreaks { .. })
    ));
}

#[test]
fn test_jenks_filter_empty() {
    let empty: Vec<String> = Vec::new();
    assert!(jenks_filter(&empty, &JenksOptions::default()).unwrap().is_empty());
}

#[test]
fn test_jenks_filter_short_input_is_only_sorted() {
    let result = jenks_filter(&["b", "a"], &JenksOptions::default()).unwrap();
    assert_eq!(result, vec!["a", "b"]);

    let result = jenks_filter(&["rock", "rock"], &JenksOptions::default()).unwrap();
    assert_eq!(result, vec!["rock", "rock"]);
}

#[test]
fn test_jenks_filter_dominant_label() {
    let input = labels(&[("rock", 10), ("pop", 1)]);
    let options = JenksOptions {
        sort_by: SortBy::Count,
        ..JenksOptions::default()
    };
    assert_eq!(jenks_filter(&input, &options).unwrap(), vec!["rock"]);
}

#[test]
fn test_jenks_filter_uniform_distribution_keeps_nothing() {
    let result = jenks_filter(&["a", "b", "c"], &JenksOptions::default()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_jenks_filter_natural_classes() {
    let input = labels(&[("a", 1), ("b", 1), ("c", 5), ("d", 5), ("e", 10), ("f", 10)]);

    let result = jenks_filter(&input, &JenksOptions::default()).unwrap();
    assert_eq!(result, vec!["c", "d", "e", "f"]);

    let strict = JenksOptions {
        strict: true,
        ..JenksOptions::default()
    };
    assert_eq!(jenks_filter(&input, &strict).unwrap(), vec!["e", "f"]);

    let by_count = JenksOptions {
        sort_by: SortBy::Count,
        ..JenksOptions::default()
    };
    assert_eq!(jenks_filter(&input, &by_count).unwrap(), vec!["e", "f", "c", "d"]);
}

#[test]
fn test_jenks_filter_output_is_subset_of_input() {
    let input = labels(&[("x", 3), ("y", 7), ("z", 2), ("w", 12), ("v", 1)]);
    let result = jenks_filter(&input, &JenksOptions::default()).unwrap();

    assert!(result.iter().all(|label| input.contains(label)));
    let mut sorted = result.clone();
    sorted.sort();
    assert_eq!(result, sorted);
}

#[test]
fn test_jenks_filter_invalid_cutoff() {
    let input = labels(&[("a", 1), ("b", 1), ("c", 5), ("d", 5), ("e", 10), ("f", 10)]);
    let options = JenksOptions {
        cutoff: 9,
        ..JenksOptions::default()
    };
    assert!(matches!(
        jenks_filter(&input, &options),
        Err(StatsError::InvalidCutoff { cutoff: 9, .. })
    ));
}

#[test]
fn test_sort_by_parse() {
    assert_eq!("count".parse::<SortBy>().unwrap(), SortBy::Count);
    assert_eq!(
        "alphabetically".parse::<SortBy>().unwrap(),
        SortBy::Alphabetically
    );
    assert!(matches!(
        "random".parse::<SortBy>(),
        Err(StatsError::InvalidSortMode(mode)) if mode == "random"
    ));
}
