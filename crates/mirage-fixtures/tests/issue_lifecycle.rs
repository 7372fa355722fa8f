use mirage::{model, prelude::*};
use mirage_fixtures::{Account, Issue, IssueLabel, Project, RecordingTransport, Subscription};

fn created_row(id: &str, title: &str, status: &str) -> Record {
    Record::new()
        .with("id", RecordId::new(id))
        .with("title", title)
        .with("status", status)
}

#[test]
fn table_names_resolve_from_registered_metadata() {
    assert_eq!(Issue::table_name().unwrap(), "issue");
    assert_eq!(IssueLabel::table_name().unwrap(), "issue_label");
    assert_eq!(Account::table_name().unwrap(), "account");
    assert!(!Issue::is_edge());
    assert!(Subscription::is_edge());
}

#[tokio::test]
async fn first_save_creates_and_adopts_server_fields() {
    let client = RecordingTransport::ok_rows(vec![vec![created_row("i1", "Fix login", "backlog")]]);

    let mut issue = Issue {
        title: Some("Fix login".to_string()),
        status: Some("backlog".to_string()),
        ..Issue::default()
    };
    model::save(&client, &mut issue).await.unwrap();

    assert_eq!(issue.id.as_ref().unwrap().as_str(), "i1");
    assert_eq!(
        client.statements(),
        vec!["CREATE issue CONTENT { status: 'backlog', title: 'Fix login' };".to_string()]
    );
}

#[tokio::test]
async fn nested_references_flatten_to_identifiers_in_content() {
    let client = RecordingTransport::ok_rows(vec![vec![created_row("i2", "Tagged", "todo")]]);

    let project = Project {
        id: Some(RecordId::new("p1")),
        name: Some("Auth".to_string()),
        ..Project::default()
    };
    let mut issue = Issue {
        title: Some("Tagged".to_string()),
        project: Some(Reference::from_model(project)),
        labels: Some(vec![
            Reference::<IssueLabel>::from_id("l1"),
            Reference::<IssueLabel>::from_id("l2"),
        ]),
        ..Issue::default()
    };
    model::save(&client, &mut issue).await.unwrap();

    assert_eq!(
        client.statements(),
        vec![
            "CREATE issue CONTENT { labels: ['l1', 'l2'], project: 'p1', title: 'Tagged' };"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn saving_with_an_unsaved_reference_fails_before_the_wire() {
    let client = RecordingTransport::default();

    let mut issue = Issue {
        title: Some("Orphan".to_string()),
        project: Some(Reference::from_model(Project::default())),
        ..Issue::default()
    };

    let err = model::save(&client, &mut issue).await.unwrap_err();
    assert!(matches!(err, Error::Normalize(_)));
    assert!(client.statements().is_empty());
}

#[tokio::test]
async fn second_save_issues_a_merge_against_the_record() {
    let client = RecordingTransport::ok_rows(vec![vec![]]);

    let mut issue = Issue {
        id: Some(RecordId::new("i1")),
        title: Some("Fix login flow".to_string()),
        ..Issue::default()
    };
    model::save(&client, &mut issue).await.unwrap();

    assert_eq!(
        client.statements(),
        vec!["UPDATE issue:i1 MERGE { id: 'i1', title: 'Fix login flow' };".to_string()]
    );
    // Merge path trusts the local record; the id stays as assigned.
    assert_eq!(issue.id.as_ref().unwrap().as_str(), "i1");
}

#[tokio::test]
async fn create_returns_the_persisted_instance() {
    let client = RecordingTransport::ok_rows(vec![vec![created_row("i9", "One", "todo")]]);

    let issue = model::create(
        &client,
        Issue {
            title: Some("One".to_string()),
            status: Some("todo".to_string()),
            ..Issue::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(issue.id.as_ref().unwrap().as_str(), "i9");
}

#[tokio::test]
async fn create_many_fans_out_one_create_per_instance() {
    let client = RecordingTransport::ok_rows(vec![
        vec![created_row("i1", "One", "todo")],
        vec![created_row("i2", "Two", "todo")],
        vec![created_row("i3", "Three", "todo")],
    ]);

    let issues = model::create_many(
        &client,
        ["One", "Two", "Three"]
            .map(|title| Issue {
                title: Some(title.to_string()),
                status: Some("todo".to_string()),
                ..Issue::default()
            })
            .into_iter()
            .collect(),
    )
    .await
    .unwrap();

    assert_eq!(issues.len(), 3);
    assert!(issues.iter().all(|issue| issue.id.is_some()));
    assert_eq!(client.statements().len(), 3);
}

#[tokio::test]
async fn create_many_propagates_the_first_failure() {
    let client = RecordingTransport::new(vec![
        Ok(vec![QueryResponse::ok(vec![created_row("i1", "One", "todo")])]),
        Err(TransportError::Connection("socket closed".to_string())),
        Ok(vec![QueryResponse::ok(vec![created_row("i3", "Three", "todo")])]),
    ]);

    let err = model::create_many(
        &client,
        (0..3).map(|_| Issue::default()).collect::<Vec<_>>(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Transport(TransportError::Connection(_))
    ));
}

#[tokio::test]
async fn select_reconstructs_instances_in_response_order() {
    let client = RecordingTransport::ok_rows(vec![vec![
        created_row("i1", "First", "todo"),
        created_row("i2", "Second", "done").with("project", "p1"),
    ]]);

    let issues = Issue::select(&client)
        .filter(expr::ne("status", &"canceled"))
        .order_by("title")
        .limit(10)
        .execute()
        .await
        .unwrap();

    assert_eq!(
        client.statements(),
        vec![
            "SELECT * FROM issue WHERE status != 'canceled' ORDER BY title ASC LIMIT 10"
                .to_string()
        ]
    );
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].title.as_deref(), Some("First"));
    assert_eq!(
        issues[1].project,
        Some(Reference::from_id("p1"))
    );
}

#[tokio::test]
async fn update_builder_merges_only_supplied_fields() {
    let client = RecordingTransport::ok_rows(vec![vec![]]);

    Issue::update(&client)
        .from("issue:i1")
        .merge(Record::new().with("status", "done"))
        .execute()
        .await
        .unwrap();

    assert_eq!(
        client.statements(),
        vec!["UPDATE issue:i1 MERGE { status: 'done' };".to_string()]
    );
}

#[tokio::test]
async fn delete_builder_addresses_one_record() {
    let client = RecordingTransport::ok_rows(vec![vec![]]);

    Issue::delete(&client).from("issue:i1").execute().await.unwrap();

    assert_eq!(client.statements(), vec!["DELETE issue:i1".to_string()]);
}

#[tokio::test]
async fn transport_error_status_reaches_the_caller() {
    let client = RecordingTransport::new(vec![Ok(vec![QueryResponse {
        status: "ERR: not allowed".to_string(),
        result: vec![],
    }])]);

    let err = Issue::select(&client).execute().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::ErrorStatus { .. })
    ));
}
