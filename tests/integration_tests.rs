use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use splitkit_cli::app::container::AppContainer;
use splitkit_cli::*;

fn song(index: u32, start: f64, end: f64) -> SegmentContext {
    SegmentContext::new("MySong", index, start, end).unwrap()
}

#[test]
fn test_readme_examples() {
    let cases = [
        ("{original_name}_part_{number:03d}", song(1, 0.0, 30.0), "MySong_part_001"),
        ("{original_name}_{number}", song(12, 0.0, 30.0), "MySong_12"),
        (
            "{original_name}_({start_time}-{end_time})",
            song(1, 90.0, 180.0),
            "MySong_(01:30-03:00)",
        ),
        ("Part{number:02d}_of_{original_name}", song(3, 0.0, 30.0), "Part03_of_MySong"),
    ];

    for (template, context, expected) in cases {
        assert_eq!(expand(template, &context).unwrap().file_name(), expected);
        let with_ext = context.with_extension("mp3");
        assert_eq!(
            expand(template, &with_ext).unwrap().file_name(),
            format!("{}.mp3", expected)
        );
    }
}

#[test]
fn test_error_kinds() {
    assert!(matches!(
        expand("{foo}", &song(1, 0.0, 1.0)),
        Err(DomainError::InvalidPattern(PatternError::UnknownToken { .. }))
    ));
    assert!(matches!(
        expand("{original_name}/{number}", &song(1, 0.0, 1.0)),
        Err(DomainError::InvalidName { .. })
    ));
}

#[test]
fn test_batch_without_number_is_flagged() {
    let contexts: Vec<SegmentContext> = (1..=5).map(|i| song(i, 0.0, 1.0)).collect();
    let template = PatternTemplate::parse("{original_name}_cut").unwrap();

    let names: Vec<String> = contexts
        .iter()
        .map(|c| template.expand(c).unwrap().file_name())
        .collect();
    assert!(names.iter().all(|n| n == "MySong_cut"));

    let namer = BatchNamer::new(template);
    assert!(matches!(
        namer.name_all(&contexts),
        Err(DomainError::DuplicateName { .. })
    ));
}

#[test]
fn test_concurrent_expansion_matches_sequential() {
    let template = Arc::new(PatternTemplate::parse("{original_name}-{number:04d}-{end_time}").unwrap());
    let contexts: Vec<SegmentContext> = (1..=64)
        .map(|i| song(i, (i - 1) as f64 * 10.0, i as f64 * 10.0).with_extension("ogg"))
        .collect();
    let sequential: Vec<ExpandedName> = contexts
        .iter()
        .map(|c| template.expand(c).unwrap())
        .collect();

    let handles: Vec<_> = contexts
        .chunks(16)
        .map(|chunk| {
            let template = Arc::clone(&template);
            let chunk = chunk.to_vec();
            thread::spawn(move || {
                chunk
                    .iter()
                    .map(|c| template.expand(c).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let parallel: Vec<ExpandedName> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_plan_through_container() {
    let dir = tempfile::tempdir().unwrap();
    let container = AppContainer::new(Some(dir.path().join("config.toml")));
    container
        .settings_interactor()
        .set_naming_pattern("{number:02d}_{original_name}")
        .unwrap();

    let planner = container.plan_interactor().unwrap();
    let plan = planner
        .plan(&PlanRequest {
            input: PathBuf::from("albums/Live Set.flac"),
            total_seconds: 125.0,
            method: SplitMethod::FixedDuration {
                duration: 60.0,
                overlap: 0.0,
            },
            pattern: None,
            format: Some("same".to_string()),
            output_dir: None,
        })
        .unwrap();

    let names: Vec<&str> = plan.segments.iter().map(|s| s.file_name.as_str()).collect();
    assert_eq!(names, vec!["01_Live Set.flac", "02_Live Set.flac", "03_Live Set.flac"]);
    assert_eq!(plan.segments[2].start, "02:00");
    assert_eq!(plan.segments[2].end, "02:05");
    assert_eq!(plan.output_dir, PathBuf::from("albums"));
}
