use crate::config::{parse_label_it_config, Criteria, RuleConfig};
use crate::errors::LabelItError;
use crate::rules::{LabelAssignment, RuleSet};
use crate::test_support::{pull_request, with_labels, MockProvider};
use crate::Labeler;
use std::sync::Arc;

const CONFIG: &str = r#"
apiVersion: 1
access:
  token: abc
owner: octo-org
repo: octo-repo
rules:
  - label: needs-review
    head-rule:
      match: "^feature/"
"#;

fn docs_rule() -> RuleConfig {
    RuleConfig {
        label: "docs".to_string(),
        file: Criteria {
            match_pattern: Some("^docs/".to_string()),
            ..Criteria::default()
        },
        ..RuleConfig::default()
    }
}

#[tokio::test]
async fn test_end_to_end_feature_branch_is_labelled() {
    let config = parse_label_it_config(CONFIG).unwrap();
    let provider = Arc::new(MockProvider::new(vec![
        pull_request(42, "feature/login"),
        pull_request(43, "hotfix/urgent"),
        with_labels(pull_request(44, "feature/search"), &["needs-review"]),
    ]));
    let labeler = Labeler::from_config(provider.clone(), &config).unwrap();

    assert_eq!(labeler.repo_owner(), "octo-org");
    assert_eq!(labeler.repo_name(), "octo-repo");

    let pull_requests = labeler.list_open_pull_requests().await.unwrap();
    let assignments = labeler
        .determine_label_assignments(&pull_requests)
        .await
        .unwrap();

    assert_eq!(
        assignments,
        vec![LabelAssignment {
            issue: 42,
            labels: vec!["needs-review".to_string()],
        }]
    );

    let messages = labeler.apply_label_assignments(&assignments).await.unwrap();

    assert_eq!(messages, vec!["Added labels \"needs-review\" to PR #42"]);
    assert_eq!(
        provider.applied(),
        vec![(42, vec!["needs-review".to_string()])]
    );
}

#[tokio::test]
async fn test_second_run_assigns_nothing() {
    let config = parse_label_it_config(CONFIG).unwrap();
    let provider = Arc::new(MockProvider::new(vec![with_labels(
        pull_request(42, "feature/login"),
        &["needs-review"],
    )]));
    let labeler = Labeler::from_config(provider.clone(), &config).unwrap();

    let pull_requests = labeler.list_open_pull_requests().await.unwrap();
    let assignments = labeler
        .determine_label_assignments(&pull_requests)
        .await
        .unwrap();

    assert!(assignments.is_empty());
}

#[tokio::test]
async fn test_files_are_not_fetched_without_file_rules() {
    let config = parse_label_it_config(CONFIG).unwrap();
    let provider = Arc::new(
        MockProvider::new(vec![pull_request(42, "feature/login")])
            .with_files(42, &["docs/index.md"]),
    );
    let labeler = Labeler::from_config(provider.clone(), &config).unwrap();

    let pull_requests = labeler.list_open_pull_requests().await.unwrap();
    labeler
        .determine_label_assignments(&pull_requests)
        .await
        .unwrap();

    assert_eq!(provider.file_request_count(), 0);
}

#[tokio::test]
async fn test_file_rules_use_fetched_files() {
    let provider = Arc::new(
        MockProvider::new(vec![
            pull_request(1, "update-guide"),
            pull_request(2, "fix-parser"),
        ])
        .with_files(1, &["docs/guide.md"])
        .with_files(2, &["src/parser.rs"]),
    );
    let rules = RuleSet::from_config(&[docs_rule()]).unwrap();
    let labeler = Labeler::new(provider.clone(), "owner", "repo", rules);

    let pull_requests = labeler.list_open_pull_requests().await.unwrap();
    let assignments = labeler
        .determine_label_assignments(&pull_requests)
        .await
        .unwrap();

    assert_eq!(
        assignments,
        vec![LabelAssignment {
            issue: 1,
            labels: vec!["docs".to_string()],
        }]
    );
    assert_eq!(provider.requested_pages(1), vec![1]);
    assert_eq!(provider.requested_pages(2), vec![1]);
}

#[tokio::test]
async fn test_file_fetch_failure_stops_matching() {
    let provider = Arc::new(MockProvider {
        fail_files_on_page: Some(1),
        ..MockProvider::new(vec![pull_request(1, "update-guide")])
    });
    let rules = RuleSet::from_config(&[docs_rule()]).unwrap();
    let labeler = Labeler::new(provider, "owner", "repo", rules);

    let pull_requests = labeler.list_open_pull_requests().await.unwrap();
    let result = labeler.determine_label_assignments(&pull_requests).await;

    assert!(matches!(result, Err(LabelItError::GitProviderError(_))));
}

#[tokio::test]
async fn test_listing_failure_is_returned() {
    let provider = Arc::new(MockProvider {
        fail_list: true,
        ..MockProvider::default()
    });
    let labeler = Labeler::new(provider, "owner", "repo", RuleSet::default());

    let result = labeler.list_open_pull_requests().await;

    assert!(matches!(result, Err(LabelItError::GitProviderError(_))));
}

#[tokio::test]
async fn test_failed_update_is_reported() {
    let config = parse_label_it_config(CONFIG).unwrap();
    let provider = Arc::new(MockProvider {
        fail_labels_for: Some(42),
        ..MockProvider::new(vec![pull_request(42, "feature/login")])
    });
    let labeler = Labeler::from_config(provider, &config).unwrap();

    let pull_requests = labeler.list_open_pull_requests().await.unwrap();
    let assignments = labeler
        .determine_label_assignments(&pull_requests)
        .await
        .unwrap();
    let result = labeler.apply_label_assignments(&assignments).await;

    assert!(matches!(result, Err(LabelItError::GitProviderError(_))));
}

#[test]
fn test_invalid_pattern_fails_before_any_request() {
    let yaml = r#"
apiVersion: 1
access:
  token: abc
owner: o
repo: r
rules:
  - label: broken
    title-rule:
      match: "(unclosed"
"#;
    let config = parse_label_it_config(yaml).unwrap();
    let provider = Arc::new(MockProvider::default());

    let result = Labeler::from_config(provider.clone(), &config);

    assert!(matches!(result, Err(LabelItError::PatternError { .. })));
    assert_eq!(provider.file_request_count(), 0);
    assert!(provider.applied().is_empty());
}
