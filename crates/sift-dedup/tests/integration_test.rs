//! Integration tests for sift-dedup.
//!
//! Covers the documented scenarios end to end, plus randomized checks of
//! the report and partition properties over seeded inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sift_dedup::{
    dedupe_json, dedupe_records, find_duplicates, find_keyed_duplicates, group_strings,
    longest_common_substring, read_records, read_strings, write_records, GroupMode, InputFormat,
    Record, Value,
};
use std::collections::{HashMap, HashSet};
use tempfile::TempDir;

/// Random short strings over a small alphabet, so collisions are common.
fn random_strings(rng: &mut StdRng, count: usize, max_len: usize) -> Vec<String> {
    const ALPHABET: &[u8] = b"abcAB-";
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..=max_len);
            (0..len)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
                .collect()
        })
        .collect()
}

fn all_modes() -> Vec<GroupMode> {
    vec![
        GroupMode::Exact,
        GroupMode::CaseInsensitive,
        GroupMode::CommonSubstring { threshold: 2 },
        GroupMode::Separator {
            separator: "-".to_string(),
            case_insensitive: false,
        },
        GroupMode::Prefix {
            length: 1,
            case_insensitive: true,
        },
    ]
}

// ============================================================================
// Documented scenarios
// ============================================================================

#[test]
fn test_scenario_scalar_duplicates() {
    let report = find_duplicates(&["a", "b", "a", "c", "b", "a"]);
    let groups: Vec<_> = report
        .iter()
        .map(|g| (g.value, g.indices.clone()))
        .collect();
    assert_eq!(groups, vec![("a", vec![0, 2, 5]), ("b", vec![1, 4])]);
}

#[test]
fn test_scenario_keyed_duplicates() {
    let items = vec![
        Record::new().with("id", 1).with("n", "x"),
        Record::new().with("id", 2).with("n", "y"),
        Record::new().with("id", 1).with("n", "z"),
    ];
    let report = find_keyed_duplicates(&items, "id");
    let groups: Vec<_> = report
        .iter()
        .map(|g| (g.value.clone(), g.indices.clone()))
        .collect();
    assert_eq!(groups, vec![(Value::Int(1), vec![0, 2])]);
}

#[test]
fn test_scenario_dedupe_dicts() {
    let kept = dedupe_json(&serde_json::json!([{"a": 1}, {"b": 2}, {"a": 1}])).unwrap();
    assert_eq!(
        kept,
        vec![Record::new().with("a", 1), Record::new().with("b", 2)]
    );
}

#[test]
fn test_scenario_longest_common_substring() {
    assert_eq!(longest_common_substring("abcdef", "zcdef"), "cdef");
}

#[test]
fn test_scenario_case_insensitive_grouping() {
    let groups = group_strings(&["Cat", "cat", "dog"], &GroupMode::CaseInsensitive).unwrap();
    assert_eq!(groups, vec![vec!["Cat", "cat"], vec!["dog"]]);
}

// ============================================================================
// Properties over seeded random inputs
// ============================================================================

#[test]
fn test_report_matches_occurrence_counts() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let items = random_strings(&mut rng, 40, 3);
        let report = find_duplicates(&items);

        let mut positions: HashMap<&String, Vec<usize>> = HashMap::new();
        for (i, item) in items.iter().enumerate() {
            positions.entry(item).or_default().push(i);
        }
        let expected: HashMap<&String, Vec<usize>> = positions
            .into_iter()
            .filter(|(_, idx)| idx.len() >= 2)
            .collect();

        assert_eq!(report.len(), expected.len());
        for group in &report {
            assert_eq!(Some(&group.indices), expected.get(&group.value));
            assert!(group.indices.windows(2).all(|w| w[0] < w[1]));
        }

        let distinct: HashSet<&String> = items.iter().collect();
        assert_eq!(report.is_empty(), distinct.len() == items.len());
    }
}

#[test]
fn test_every_mode_partitions_random_input() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..20 {
        let items = random_strings(&mut rng, 25, 6);
        for mode in all_modes() {
            let groups = group_strings(&items, &mode).unwrap();

            let mut flattened: Vec<&String> = groups.iter().flatten().collect();
            let mut expected: Vec<&String> = items.iter().collect();
            flattened.sort();
            expected.sort();
            assert_eq!(flattened, expected, "mode {}", mode.name());
            assert!(groups.iter().all(|g| !g.is_empty()));
        }
    }
}

#[test]
fn test_exact_grouping_idempotent_on_random_input() {
    let mut rng = StdRng::seed_from_u64(13);
    let items = random_strings(&mut rng, 60, 2);

    let first = group_strings(&items, &GroupMode::Exact).unwrap();
    let flattened: Vec<String> = first.iter().flatten().cloned().collect();
    let second = group_strings(&flattened, &GroupMode::Exact).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_lcs_length_symmetric_on_random_input() {
    let mut rng = StdRng::seed_from_u64(17);
    let items = random_strings(&mut rng, 40, 8);

    for pair in items.chunks(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let ab = longest_common_substring(a, b);
        let ba = longest_common_substring(b, a);
        assert_eq!(ab.chars().count(), ba.chars().count());
        assert!(a.contains(&ab) && b.contains(&ab));
        assert_eq!(longest_common_substring("", a), "");
    }
}

// ============================================================================
// File round trips
// ============================================================================

#[test]
fn test_jsonl_dedupe_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("input.jsonl");
    let output_path = temp_dir.path().join("output.jsonl");

    let records: Vec<Record> = (0..30)
        .map(|i| Record::new().with("id", i % 10).with("name", format!("item-{}", i % 10)))
        .collect();
    write_records(&input_path, &records, InputFormat::Jsonl).unwrap();

    let loaded = read_records(&input_path, InputFormat::Jsonl).unwrap();
    assert_eq!(loaded.len(), 30);

    let kept = dedupe_records(&loaded);
    assert_eq!(kept.len(), 10);
    write_records(&output_path, &kept, InputFormat::Jsonl).unwrap();

    let final_records = read_records(&output_path, InputFormat::Jsonl).unwrap();
    assert_eq!(final_records, kept);
}

#[test]
fn test_text_grouping_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("names.txt");
    std::fs::write(
        &input_path,
        "KV-MDF-9200-1_2\nKV-MDF1-9200-1_2\nTI-IDF1-9200-1_2\nJJ-MDF-9200-1_2\n",
    )
    .unwrap();

    let strings = read_strings(&input_path, InputFormat::Text, None).unwrap();
    let mode = GroupMode::Separator {
        separator: "-".to_string(),
        case_insensitive: false,
    };
    let groups = group_strings(&strings, &mode).unwrap();
    assert_eq!(
        groups,
        vec![
            vec!["KV-MDF-9200-1_2", "KV-MDF1-9200-1_2"],
            vec!["TI-IDF1-9200-1_2"],
            vec!["JJ-MDF-9200-1_2"],
        ]
    );
}
