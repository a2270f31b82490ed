mod fixtures;

use serde_json::json;

use fixtures::*;
use worker_versions::versions::secrets::{rotate_secrets, RotateOptions, Secret};
use worker_versions::VersionsError;

fn es_module_content() -> worker_versions::http::RawResponse {
    multipart_content(
        Some("index.mjs"),
        &[
            ("index.mjs", "application/javascript+module", "export default {};"),
            ("utils.mjs", "application/javascript+module", "export const a = 1;"),
        ],
    )
}

#[tokio::test]
async fn it_replaces_a_secret_and_keeps_everything_else() {
    let client = FakeApiClient::with_version(
        json!([
            { "type": "plain_text", "name": "ENV", "text": "prod" },
            { "type": "secret_text", "name": "API_KEY", "text": "old" }
        ]),
        es_module_content(),
    );
    let options = RotateOptions {
        message: Some("Rotate API_KEY".to_string()),
        tag: None,
        send_metrics: Some(false),
    };

    let published = rotate_secrets(
        &client,
        ACCOUNT_ID,
        SCRIPT_NAME,
        "v1",
        &[Secret::new("API_KEY", "new")],
        &options,
    )
    .await
    .unwrap();

    assert_eq!(published.id.as_deref(), Some("new-version"));
    assert_eq!(published.etag.as_deref(), Some("etag-2"));
    assert!(published.available_on_subdomain);
    assert_eq!(published.deployment_id, None);

    let posted = client.posted();
    assert_eq!(posted.len(), 1);
    let upload = &posted[0];
    assert_eq!(upload.path, versions_path());
    assert!(upload
        .query
        .contains(&("excludeScript".to_string(), "true".to_string())));
    assert!(upload
        .query
        .contains(&("include_subdomain_availability".to_string(), "true".to_string())));
    assert_eq!(upload.headers.get("metricsenabled").unwrap(), "false");

    let metadata = upload.form.metadata().unwrap();
    assert_eq!(
        metadata["bindings"],
        json!([
            { "type": "plain_text", "name": "ENV", "text": "prod" },
            { "type": "secret_text", "name": "API_KEY", "text": "new" }
        ])
    );
    assert_eq!(metadata["main_module"], "index.mjs");
    assert_eq!(metadata["keep_bindings"], json!(["secret_text", "secret_key"]));
    assert_eq!(metadata["compatibility_date"], "2024-01-01");
    assert_eq!(metadata["usage_model"], "standard");
    assert_eq!(metadata["annotations"], json!({ "workers/message": "Rotate API_KEY" }));

    let names: Vec<&str> = upload.form.parts().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["metadata", "index.mjs", "utils.mjs"]);
}

#[tokio::test]
async fn no_secrets_reproduces_the_source_version() {
    let client = FakeApiClient::with_version(
        json!([
            { "type": "kv_namespace", "name": "CACHE", "namespace_id": "abc" },
            { "type": "secret_text", "name": "TOKEN", "text": "" },
            { "type": "json", "name": "CONFIG", "json": { "debug": false } }
        ]),
        es_module_content(),
    );

    rotate_secrets(&client, ACCOUNT_ID, SCRIPT_NAME, "v1", &[], &RotateOptions::default())
        .await
        .unwrap();

    let posted = client.posted();
    let form = &posted[0].form;
    let metadata = form.metadata().unwrap();
    assert_eq!(
        metadata["bindings"],
        json!([
            { "type": "kv_namespace", "name": "CACHE", "namespace_id": "abc" },
            { "type": "json", "name": "CONFIG", "json": { "debug": false } }
        ])
    );
    assert!(metadata.get("annotations").is_none());
    assert_eq!(
        form.part("index.mjs").unwrap().data,
        b"export default {};".to_vec()
    );
    assert_eq!(
        form.part("utils.mjs").unwrap().data,
        b"export const a = 1;".to_vec()
    );
}

#[tokio::test]
async fn a_service_worker_is_uploaded_as_a_body_part() {
    let client = FakeApiClient::with_version(
        json!([]),
        single_body_content("application/javascript", "console.log(1)"),
    );

    rotate_secrets(
        &client,
        ACCOUNT_ID,
        SCRIPT_NAME,
        "v1",
        &[Secret::new("A", "a")],
        &RotateOptions::default(),
    )
    .await
    .unwrap();

    let posted = client.posted();
    let form = &posted[0].form;
    let metadata = form.metadata().unwrap();
    assert_eq!(metadata["body_part"], "index.js");
    assert!(metadata.get("main_module").is_none());

    let script = form.part("index.js").unwrap();
    assert_eq!(script.data, b"console.log(1)".to_vec());
    assert_eq!(script.content_type, "application/javascript");
}

#[tokio::test]
async fn workers_sites_are_refused_before_uploading() {
    let client = FakeApiClient::with_version(
        json!([]),
        multipart_content(
            Some("index.js"),
            &[
                ("index.js", "application/javascript", "addEventListener('fetch', () => {})"),
                ("__STATIC_CONTENT_MANIFEST", "text/plain", "{}"),
            ],
        ),
    );

    let result = rotate_secrets(
        &client,
        ACCOUNT_ID,
        SCRIPT_NAME,
        "v1",
        &[Secret::new("A", "a")],
        &RotateOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(VersionsError::UnsupportedArtifact(_))));
    assert!(client.posted().is_empty());
    assert!(client.requests().iter().all(|r| r.starts_with("GET ")));
}

#[tokio::test]
async fn a_missing_entrypoint_stops_the_pipeline() {
    let client = FakeApiClient::with_version(
        json!([]),
        multipart_content(
            Some("worker.mjs"),
            &[("index.mjs", "application/javascript+module", "export default {};")],
        ),
    );

    let result = rotate_secrets(
        &client,
        ACCOUNT_ID,
        SCRIPT_NAME,
        "v1",
        &[],
        &RotateOptions::default(),
    )
    .await;

    match result {
        Err(VersionsError::MalformedResponse(msg)) => assert!(msg.contains("worker.mjs")),
        other => panic!("expected a malformed response error, got {:?}", other),
    }
    assert!(client.posted().is_empty());
}

#[tokio::test]
async fn an_unknown_version_is_reported_as_not_found() {
    let client = FakeApiClient::with_version(json!([]), es_module_content());

    let result = rotate_secrets(
        &client,
        ACCOUNT_ID,
        SCRIPT_NAME,
        "does-not-exist",
        &[],
        &RotateOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(VersionsError::NotFound { .. })));
    assert!(client.posted().is_empty());
}

#[tokio::test]
async fn a_rejected_upload_carries_the_api_body() {
    let client = FakeApiClient::with_version(json!([]), es_module_content()).rejecting_uploads();

    let result = rotate_secrets(
        &client,
        ACCOUNT_ID,
        SCRIPT_NAME,
        "v1",
        &[Secret::new("A", "a")],
        &RotateOptions::default(),
    )
    .await;

    match result {
        Err(VersionsError::PublishRejected { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("10021"));
        }
        other => panic!("expected a rejected upload, got {:?}", other),
    }
}

#[tokio::test]
async fn it_downloads_the_code_of_the_requested_version() {
    let client = FakeApiClient::with_version(json!([]), es_module_content());

    rotate_secrets(&client, ACCOUNT_ID, SCRIPT_NAME, "v1", &[], &RotateOptions::default())
        .await
        .unwrap();

    assert_eq!(
        client.queries_for(&content_path()),
        vec![vec![("version".to_string(), "v1".to_string())]]
    );
}

#[tokio::test]
async fn limits_and_usage_model_are_copied_verbatim() {
    let mut details = version_details("v1", json!([]));
    details["resources"]["script_runtime"] = json!({
        "compatibility_date": "2024-01-01",
        "compatibility_flags": [],
        "usage_model": "elastic",
        "limits": { "cpu_ms": 50, "subrequests": 1000 }
    });
    let client = FakeApiClient::with_version_details(details, es_module_content());

    rotate_secrets(&client, ACCOUNT_ID, SCRIPT_NAME, "v1", &[], &RotateOptions::default())
        .await
        .unwrap();

    let metadata = client.posted()[0].form.metadata().unwrap();
    assert_eq!(metadata["usage_model"], "elastic");
    assert_eq!(metadata["limits"], json!({ "cpu_ms": 50, "subrequests": 1000 }));
}
