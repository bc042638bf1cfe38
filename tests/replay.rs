use std::path::Path;

use httpmock::Method::GET;
use httpmock::MockServer;
use kuchiki::traits::TendrilSink as _;
use tempfile::tempdir;
use url::Url;

use docs_chrome_replay::{CliArgs, TraceStyle};

fn base_args() -> CliArgs {
    CliArgs {
        page: None,
        page_url: None,
        sample: false,
        timeline: None,
        offsets: vec![],
        initial_offset: 0,
        viewport_width: 1280,
        viewport_height: 800,
        out: None,
        trace: None,
        trace_style: TraceStyle::Pretty,
        keep_dark_reader: false,
        user_agent: "test-agent".to_string(),
    }
}

fn read_to_string(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

fn read_trace(path: &Path) -> serde_json::Value {
    serde_json::from_str(&read_to_string(path)).unwrap()
}

fn style_of(html: &str, selector: &str) -> Option<String> {
    let document = kuchiki::parse_html().one(html);
    document
        .select_first(selector)
        .ok()
        .and_then(|node| node.attributes.borrow().get("style").map(|s| s.to_string()))
}

#[tokio::test]
async fn scroll_session_updates_header_and_badge() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("sample-replayed.html");
    let trace_path = tmp.path().join("trace.json");

    // Down past the collapse threshold, then far enough back up that the
    // badge returns too.
    let args = CliArgs {
        sample: true,
        initial_offset: 500,
        viewport_width: 800,
        viewport_height: 600,
        offsets: vec![520, 480],
        out: Some(out.clone()),
        trace: Some(trace_path.clone()),
        ..base_args()
    };
    docs_chrome_replay::run(args).await.unwrap();

    let html = read_to_string(&out);
    let header_style = style_of(&html, ".md-header").unwrap();
    assert!(header_style.contains("top: 0"));
    assert!(header_style.contains("display: block"));
    assert!(header_style.contains("var(--chrome-header-default)"));
    let badge_style = style_of(&html, ".rst-versions.rst-badge").unwrap();
    assert!(badge_style.contains("display: block"));

    let trace = read_trace(&trace_path);
    assert_eq!(trace["page"], "sample");
    assert_eq!(trace["initial"]["offset"], 500);
    assert_eq!(trace["initial"]["viewport"]["width"], 800);
    assert_eq!(trace["chrome"]["header"], true);
    assert_eq!(trace["chrome"]["version_badge"], true);

    assert_eq!(trace["steps"][0]["delta"], 20);
    assert_eq!(trace["steps"][0]["commands"][0]["op"], "set_header_top");
    assert_eq!(trace["steps"][0]["commands"][0]["position"], "offscreen");
    assert_eq!(trace["steps"][0]["commands"][1]["op"], "set_badge_display");
    assert_eq!(trace["steps"][0]["commands"][1]["display"], "hidden");
    assert_eq!(trace["steps"][0]["applied"], 2);

    assert_eq!(trace["steps"][1]["delta"], -40);
    assert_eq!(trace["steps"][1]["applied"], 4);
    assert_eq!(trace["final_offset"], 480);

    assert_eq!(trace["input_digest"].as_str().unwrap().len(), 64);
    assert_eq!(trace["output_digest"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn wide_viewports_keep_the_header_and_switch_skin() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("wide.html");

    let args = CliArgs {
        sample: true,
        initial_offset: 500,
        offsets: vec![520],
        out: Some(out.clone()),
        ..base_args()
    };
    docs_chrome_replay::run(args).await.unwrap();

    let html = read_to_string(&out);
    let header_style = style_of(&html, ".md-header").unwrap();
    assert!(header_style.contains("var(--chrome-header-focused)"));
    assert!(!header_style.contains("-3rem"));
    let badge_style = style_of(&html, ".rst-versions.rst-badge").unwrap();
    assert!(badge_style.contains("display: none"));
}

#[tokio::test]
async fn timeline_resize_changes_later_scroll_behavior() {
    let tmp = tempdir().unwrap();
    let timeline = tmp.path().join("timeline.json");
    let out = tmp.path().join("resized.html");
    let trace_path = tmp.path().join("trace.json");

    std::fs::write(
        &timeline,
        r#"{
  "initial": { "offset": 100, "viewport": { "width": 1280, "height": 800 } },
  "events": [
    { "type": "resize", "width": 1024, "height": 700 },
    { "type": "scroll", "offset": 140 }
  ]
}"#,
    )
    .unwrap();

    let args = CliArgs {
        sample: true,
        timeline: Some(timeline),
        out: Some(out.clone()),
        trace: Some(trace_path.clone()),
        ..base_args()
    };
    docs_chrome_replay::run(args).await.unwrap();

    let html = read_to_string(&out);
    for selector in [".md-container", ".md-header", ".md-footer"] {
        let style = style_of(&html, selector).unwrap();
        assert!(style.contains("width: 1024px"), "{selector}: {style}");
    }
    // After the resize the viewport is narrow, so the 40 px scroll hides the
    // header instead of re-skinning it.
    let header_style = style_of(&html, ".md-header").unwrap();
    assert!(header_style.contains("top: -3rem"));

    let trace = read_trace(&trace_path);
    assert_eq!(trace["steps"][0]["event"]["type"], "resize");
    assert!(trace["steps"][0].get("delta").is_none());
    assert_eq!(trace["steps"][0]["applied"], 3);
    assert_eq!(trace["steps"][1]["event"]["type"], "scroll");
    assert_eq!(trace["steps"][1]["delta"], 40);
    assert_eq!(trace["final_offset"], 140);
}

#[tokio::test]
async fn fetches_the_page_from_a_url() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/docs/");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(
                r#"<!doctype html>
<html>
  <head><title>Remote Docs</title></head>
  <body>
    <header class="md-header">Remote</header>
    <div class="md-container">content</div>
    <footer class="md-footer">footer</footer>
  </body>
</html>"#,
            );
    });

    let tmp = tempdir().unwrap();
    let out = tmp.path().join("remote-replayed.html");
    let trace_path = tmp.path().join("trace.json");

    let args = CliArgs {
        page_url: Some(Url::parse(&server.url("/docs/")).unwrap()),
        viewport_width: 900,
        viewport_height: 600,
        offsets: vec![40],
        out: Some(out.clone()),
        trace: Some(trace_path.clone()),
        ..base_args()
    };
    docs_chrome_replay::run(args).await.unwrap();

    let html = read_to_string(&out);
    let header_style = style_of(&html, ".md-header").unwrap();
    assert!(header_style.contains("top: -3rem"));

    // No badge on this page, so only the header command lands.
    let trace = read_trace(&trace_path);
    assert_eq!(trace["chrome"]["version_badge"], false);
    assert_eq!(trace["steps"][0]["commands"].as_array().unwrap().len(), 2);
    assert_eq!(trace["steps"][0]["applied"], 1);
}

#[tokio::test]
async fn strips_dark_reader_artifacts_by_default() {
    let page = r#"<!DOCTYPE html>
<html data-darkreader-mode="dynamic" data-darkreader-scheme="dark">
<head>
<meta name="darkreader" content="bf1c4a93">
<style class="darkreader darkreader--fallback">html { background: #181a1b; }</style>
</head>
<body>
<header class="md-header" data-darkreader-inline-bgcolor=""
 style="background-color: #fff; --darkreader-inline-bgcolor: #181a1b;">Docs</header>
</body>
</html>"#;

    let tmp = tempdir().unwrap();
    let input = tmp.path().join("dark.html");
    std::fs::write(&input, page).unwrap();
    let trace_path = tmp.path().join("trace.json");

    let args = CliArgs {
        page: Some(input.clone()),
        viewport_width: 800,
        viewport_height: 600,
        offsets: vec![10],
        trace: Some(trace_path.clone()),
        ..base_args()
    };
    docs_chrome_replay::run(args).await.unwrap();

    // Default output path sits next to the input.
    let out = tmp.path().join("dark-replayed.html");
    let html = read_to_string(&out);
    assert!(!html.contains("data-darkreader"));
    assert!(!html.contains("--darkreader-inline"));
    assert!(!html.contains("darkreader--fallback"));
    assert!(html.contains("background-color: #fff"));
    assert_eq!(read_trace(&trace_path)["dark_reader_stripped"], true);

    // Same page with the override kept.
    let out_kept = tmp.path().join("dark-kept.html");
    let args = CliArgs {
        page: Some(input),
        viewport_width: 800,
        viewport_height: 600,
        offsets: vec![10],
        out: Some(out_kept.clone()),
        trace: Some(trace_path.clone()),
        keep_dark_reader: true,
        ..base_args()
    };
    docs_chrome_replay::run(args).await.unwrap();

    let html = read_to_string(&out_kept);
    assert!(html.contains("data-darkreader-mode"));
    assert!(html.contains("darkreader--fallback"));
    assert_eq!(read_trace(&trace_path)["dark_reader_stripped"], false);
}

#[tokio::test]
async fn pages_without_chrome_replay_without_effect() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("plain.html");
    std::fs::write(
        &input,
        "<!doctype html><html><body><article>no chrome here</article></body></html>",
    )
    .unwrap();
    let out = tmp.path().join("plain-out.html");
    let trace_path = tmp.path().join("trace.json");

    let args = CliArgs {
        page: Some(input),
        offsets: vec![500],
        out: Some(out.clone()),
        trace: Some(trace_path.clone()),
        ..base_args()
    };
    docs_chrome_replay::run(args).await.unwrap();

    let html = read_to_string(&out);
    assert!(html.contains("no chrome here"));
    assert!(!html.contains("style="));

    let trace = read_trace(&trace_path);
    assert_eq!(trace["chrome"]["header"], false);
    assert_eq!(trace["chrome"]["container"], false);
    assert_eq!(trace["steps"][0]["applied"], 0);
    assert_eq!(trace["final_offset"], 500);
}

#[tokio::test]
async fn rejects_conflicting_event_sources() {
    let tmp = tempdir().unwrap();
    let timeline = tmp.path().join("timeline.json");
    std::fs::write(&timeline, r#"{ "events": [] }"#).unwrap();

    let args = CliArgs {
        sample: true,
        timeline: Some(timeline),
        offsets: vec![10],
        ..base_args()
    };
    assert!(docs_chrome_replay::run(args).await.is_err());

    let args = CliArgs {
        sample: true,
        ..base_args()
    };
    assert!(docs_chrome_replay::run(args).await.is_err());
}
