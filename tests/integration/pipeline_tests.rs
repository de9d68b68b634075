//! Integration tests for the full pipeline
//!
//! A wiremock server plays the documentation site; each test runs
//! crawl → extract → infer → summarize and inspects the module tree.

use pulse::config::Config;
use pulse::output::{
    render_markdown, to_json_string, to_records, write_records, write_stats_json, OutputFormat,
};
use pulse::pipeline::run_pipeline;
use std::collections::HashSet;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config {
        seeds: vec![format!("{}/", server.uri())],
        ..Config::default()
    };
    config.crawler.delay = 0.0;
    config.crawler.max_retries = 0;
    config
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html"))
        .mount(server)
        .await;
}

fn words(text: &str) -> HashSet<&str> {
    text.split_whitespace().collect()
}

#[tokio::test]
async fn test_install_requirements_scenario() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><head><title>Docs</title></head><body>
             <nav><a href="/">Home</a><h2>Site navigation</h2></nav>
             <main>
               <h1>Install</h1>
               <p>Install the CLI by running setup.</p>
               <h2>Requirements</h2>
               <p>Needs network access.</p>
             </main>
             <footer><p>Copyright notice for the whole site.</p></footer>
           </body></html>"#,
    )
    .await;

    let config = create_test_config(&server);
    let report = run_pipeline(&config).await.expect("pipeline failed");

    let json = to_json_string(&to_records(&report.result), false).unwrap();
    assert_eq!(
        json,
        r#"[{"module":"Install","Description":"Install the CLI by running setup.","Submodules":{"Requirements":"Needs network access."}}]"#
    );

    let module = &report.result.modules[0];
    assert_eq!(module.text(), "Install the CLI by running setup.");
    assert_eq!(module.submodules[0].text(), "Needs network access.");
    assert_eq!(report.stats.pages_fetched, 1);
    assert_eq!(report.stats.module_level, Some(1));
}

#[tokio::test]
async fn test_modules_merge_across_pages() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<body>
             <h1>Getting Started</h1>
             <p>Download the release archive for your platform.</p>
             <a href="/more">More</a>
           </body>"#,
    )
    .await;
    mount_page(
        &server,
        "/more",
        r#"<body>
             <h1>getting   started</h1>
             <p>Unpack the archive and add it to your path.</p>
           </body>"#,
    )
    .await;

    let config = create_test_config(&server);
    let report = run_pipeline(&config).await.expect("pipeline failed");

    assert_eq!(report.result.modules.len(), 1);
    let module = &report.result.modules[0];
    assert_eq!(module.name, "Getting Started");
    assert_eq!(
        module.text(),
        "Download the release archive for your platform. \
         Unpack the archive and add it to your path."
    );
}

#[tokio::test]
async fn test_descriptions_are_extractive() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<body>
             <h2>Routing</h2>
             <p>The router matches incoming requests against registered routes. Routes are
                checked in the order they were added. The first matching route handles the
                request and later routes are ignored.</p>
             <ul>
               <li>Static routes match a fixed path exactly.</li>
               <li>Dynamic routes capture path segments as named parameters.</li>
             </ul>
             <h3>Middleware</h3>
             <p>Middleware wraps every handler and can modify the request or the response.
                Click here to read about writing your own middleware.</p>
             <a href="/storage">Storage</a>
           </body>"#,
    )
    .await;
    mount_page(
        &server,
        "/storage",
        r#"<body>
             <h2>Storage</h2>
             <p>Records are persisted in an embedded key value store. Each write is
                flushed before the call returns.</p>
           </body>"#,
    )
    .await;

    let config = create_test_config(&server);
    let report = run_pipeline(&config).await.expect("pipeline failed");

    assert_eq!(report.stats.module_level, Some(2));
    assert_eq!(report.result.modules.len(), 2);

    for module in &report.result.modules {
        assert!(!module.description.is_empty());
        let source = words(module.text());
        for word in module.description.split_whitespace() {
            assert!(source.contains(word), "'{}' not in module source", word);
        }

        for submodule in &module.submodules {
            let source = words(submodule.text());
            for word in submodule.description.split_whitespace() {
                assert!(source.contains(word), "'{}' not in submodule source", word);
            }
            assert!(!submodule.description.contains("Click here"));
        }
    }
}

#[tokio::test]
async fn test_pipeline_is_idempotent() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<body>
             <h1>Overview</h1><p>Pulse turns documentation sites into module trees.</p>
             <h2>Scope</h2><p>Only pages on the seed domains are crawled.</p>
             <a href="/b">B</a><a href="/a">A</a>
           </body>"#,
    )
    .await;
    mount_page(
        &server,
        "/a",
        r#"<body><h1>Alpha</h1><p>Alpha explains the first concept in detail.</p></body>"#,
    )
    .await;
    mount_page(
        &server,
        "/b",
        r#"<body><h1>Beta</h1><h2>Scope</h2><p>Beta has its own scope section text.</p></body>"#,
    )
    .await;

    let config = create_test_config(&server);
    let first = run_pipeline(&config).await.expect("first run failed");
    let second = run_pipeline(&config).await.expect("second run failed");

    assert_eq!(first.result, second.result);
    assert_eq!(to_records(&first.result), to_records(&second.result));

    let names: Vec<_> = first.result.modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Overview", "Beta", "Alpha"]);
}

#[tokio::test]
async fn test_page_without_headings_yields_empty_result() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<body><p>This page has plenty of text but no headings at all.</p></body>"#,
    )
    .await;

    let config = create_test_config(&server);
    let report = run_pipeline(&config).await.expect("pipeline failed");

    assert!(report.result.is_empty());
    assert_eq!(report.stats.module_level, None);
    assert_eq!(report.stats.orphan_blocks, 0);
    assert_eq!(to_json_string(&to_records(&report.result), false).unwrap(), "[]");
}

#[tokio::test]
async fn test_unreachable_site_still_completes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let report = run_pipeline(&config).await.expect("pipeline failed");

    assert!(report.result.is_empty());
    assert_eq!(report.stats.pages_fetched, 0);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.stats.error_count(), 1);
}

#[tokio::test]
async fn test_output_files_written() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<body><h1>Install</h1><p>Install the CLI by running setup.</p>
             <h2>Requirements</h2><p>Needs network access.</p></body>"#,
    )
    .await;

    let config = create_test_config(&server);
    let report = run_pipeline(&config).await.expect("pipeline failed");
    let records = to_records(&report.result);

    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("out").join("modules.json");
    let md_path = dir.path().join("modules.md");

    write_records(&records, &json_path, OutputFormat::Json, true).unwrap();
    write_records(&records, &md_path, OutputFormat::Markdown, false).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json[0]["module"], "Install");
    assert_eq!(json[0]["Submodules"]["Requirements"], "Needs network access.");

    let markdown = std::fs::read_to_string(&md_path).unwrap();
    assert_eq!(markdown, render_markdown(&records));
    assert!(markdown.contains("## Install"));

    let stats_path = dir.path().join("stats.json");
    write_stats_json(&report.stats, &stats_path).unwrap();
    let stats: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&stats_path).unwrap()).unwrap();
    assert_eq!(stats["pages_fetched"], 1);
    assert_eq!(stats["modules"], 1);
    assert_eq!(stats["submodules"], 1);
    assert_eq!(stats["module_level"], 1);
}
