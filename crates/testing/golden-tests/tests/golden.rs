//! Golden-file tests for module rendering

use expect_test::expect_file;
use golden_tests::{fixtures, render_module};
use ql_render::{RendererModifier, RendererOptions};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    // Another test may have installed the subscriber already
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init()
        .ok();
}

#[test]
fn test_geometry_module() {
    init_tracing();
    let rendered = render_module(&fixtures::geometry(), &RendererOptions::default()).unwrap();
    expect_file!["data/geometry.rendered"].assert_eq(&rendered);
}

#[test]
fn test_service_module_with_blocks() {
    init_tracing();
    let options = RendererOptions::everything().with_containing_declarations(true);
    let rendered = render_module(&fixtures::service(), &options).unwrap();
    expect_file!["data/service.rendered"].assert_eq(&rendered);
}

#[test]
fn test_no_blocks_without_containing_declarations() {
    let options = RendererOptions::everything();
    for module in [fixtures::geometry(), fixtures::service()] {
        let rendered = render_module(&module, &options).unwrap();
        assert!(!rendered.contains('{'), "unexpected block in:\n{rendered}");
    }
}

#[test]
fn test_no_empty_blocks() {
    let options = RendererOptions::everything().with_containing_declarations(true);
    for module in [fixtures::geometry(), fixtures::service()] {
        let rendered = render_module(&module, &options).unwrap();
        let compact: String = rendered.chars().filter(|ch| !ch.is_whitespace()).collect();
        assert!(!compact.contains("{}"), "empty block in:\n{rendered}");
    }
}

#[test]
fn test_empty_renderings_are_skipped() {
    let rendered = render_module(&fixtures::geometry(), &RendererOptions::default()).unwrap();
    assert!(rendered.lines().all(|line| !line.is_empty()), "blank line in:\n{rendered}");
    assert!(rendered.contains("enum class Color\nobject : geometry.Color\n"));
}

#[test]
fn test_options_from_toml() {
    let options: RendererOptions = toml::from_str(
        r#"
        modifiers = ["visibility", "override"]
        short_qualified_names = true
        unit_return_type_shown = true
        "#,
    )
    .unwrap();
    assert!(!options.has(RendererModifier::Modality));

    let rendered = render_module(&fixtures::geometry(), &options).unwrap();
    let lines: Vec<_> = rendered.lines().collect();
    assert_eq!(lines[6], "class Polygon : Shape");
    assert_eq!(lines[9], "override fun area(): Double");
    assert_eq!(lines[10], "val corners: Int");
    assert_eq!(lines[17], "typealias Shapes = List<Shape>");
}
