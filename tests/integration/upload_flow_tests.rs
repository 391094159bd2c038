//! End-to-end upload flow: log text → aggregation → confirmation →
//! concurrent pipeline → merged result lines, against the fake tracker.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;

use jiralog::console::{confirm_and_launch, print_results};
use jiralog::pipeline::UploadPipeline;
use jiralog::timelog::{aggregate, split_lines};
use jiralog::tracker::JiraClient;

use super::test_helpers::{spawn_fake_tracker, test_config, FakeTracker};

const DAY_LOG: &str = "\
0900 #BLAH-1 standup and triage
0930 #BLAH-2 review pull request
1030 coffee
1045 #BLAH-1 back on the bug
1215 #BLAH-3 deploy
1300 lunch
";

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

async fn run_day(state: Arc<FakeTracker>, answers: &str) -> Vec<String> {
    let base = spawn_fake_tracker(Arc::clone(&state)).await;
    let config = test_config(&base);

    let lines = split_lines(DAY_LOG);
    let agg = aggregate(&lines, &config.prefix).unwrap();

    let zone = config.zone();
    let client = Arc::new(JiraClient::new(config));
    let (pipeline, results) = UploadPipeline::new(client, date(), zone);

    let mut input = answers.as_bytes();
    confirm_and_launch(&agg, &mut input, &mut Vec::<u8>::new(), &pipeline)
        .await
        .unwrap();

    let closer = pipeline.finish();
    let mut out = Vec::new();
    print_results(results, &mut out).await.unwrap();
    closer.await.unwrap();

    let mut lines: Vec<String> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect();
    lines.sort();
    lines
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn confirmed_tasks_are_uploaded_with_start_and_seconds() {
    let state = Arc::new(FakeTracker {
        prior: HashMap::from([("BLAH-2".to_owned(), vec![7200])]).into(),
        ..FakeTracker::default()
    });

    // Prompt order follows first start: BLAH-1, BLAH-2, BLAH-3.
    let lines = run_day(Arc::clone(&state), "y\ny\nn\n").await;

    assert_eq!(
        lines,
        [
            "    BLAH-1  2.00 h uploaded, total spent =  2.00 h",
            "    BLAH-2  1.00 h uploaded, total spent =  3.00 h",
        ]
    );

    let blah1 = state.uploads_for("BLAH-1");
    assert_eq!(blah1.len(), 1);
    assert_eq!(blah1[0]["started"], "2024-03-05T09:00:00.000+0000");
    assert_eq!(blah1[0]["timeSpentSeconds"], (30 + 90) * 60);

    assert!(state.uploads_for("BLAH-3").is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failed_upload_is_reported_and_never_fetched() {
    let state = Arc::new(FakeTracker {
        failing_uploads: HashSet::from(["BLAH-2".to_owned()]),
        ..FakeTracker::default()
    });

    let lines = run_day(Arc::clone(&state), "y\ny\ny\n").await;

    assert_eq!(lines.len(), 3);
    let failure = lines
        .iter()
        .find(|l| l.starts_with("error logging to BLAH-2:"))
        .expect("failure line for BLAH-2");
    assert!(failure.contains("500"), "{failure}");
    assert!(failure.contains("boom"), "{failure}");

    // Only the two successful uploads query their totals.
    assert_eq!(state.list_hits(), 2);
    assert!(lines.iter().any(|l| l.contains("BLAH-3  0.75 h uploaded")));
}

#[tokio::test]
async fn declining_everything_uploads_nothing() {
    let state = Arc::new(FakeTracker::default());
    let lines = run_day(Arc::clone(&state), "").await;

    assert!(lines.is_empty());
    assert!(state.headers.lock().unwrap().is_empty());
}
