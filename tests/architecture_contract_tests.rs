//! Architecture contract tests.

mod support;

use support::architecture::{
    find_lines_containing, find_lines_containing_outside, find_non_export_lines_in_mod_files,
    path_exists, read_relative,
};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "reqwest::",
            "diesel::",
            "axum::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain() {
    let hits = find_lines_containing(
        "src/port",
        &["crate::adapter", "crate::application", "reqwest::", "diesel::", "axum::"],
    );
    assert!(
        hits.is_empty(),
        "outbound ports should only reference domain types: {hits:#?}"
    );
}

#[test]
fn application_layer_has_no_direct_adapter_imports() {
    let hits = find_lines_containing("src/application", &["crate::adapter::"]);
    assert!(
        hits.is_empty(),
        "application layer should not import adapters directly: {hits:#?}"
    );
}

#[test]
fn application_layer_has_no_transport_imports() {
    let hits = find_lines_containing("src/application", &["reqwest::", "diesel::", "axum::"]);
    assert!(
        hits.is_empty(),
        "application layer should reach the outside world through ports: {hits:#?}"
    );
}

#[test]
fn http_client_is_confined_to_outbound_adapters() {
    let hits = find_lines_containing_outside(
        "src",
        &["reqwest::"],
        &["src/adapter/outbound/", "src/error.rs"],
    );
    assert!(
        hits.is_empty(),
        "reqwest should only appear in outbound adapters: {hits:#?}"
    );
}

#[test]
fn diesel_is_confined_to_sqlite_adapter() {
    let hits = find_lines_containing_outside(
        "src",
        &["diesel::", "use diesel"],
        &["src/adapter/outbound/sqlite/", "src/error.rs"],
    );
    assert!(
        hits.is_empty(),
        "diesel should only appear in the SQLite adapter: {hits:#?}"
    );
}

#[test]
fn http_adapter_does_not_bootstrap() {
    let hits = find_lines_containing(
        "src/adapter/inbound/http",
        &["infrastructure::bootstrap", "adapter::outbound"],
    );
    assert!(
        hits.is_empty(),
        "HTTP handlers should receive collaborators through AppState: {hits:#?}"
    );
}

#[test]
fn mod_rs_is_export_only() {
    let violations = find_non_export_lines_in_mod_files("src");
    assert!(
        violations.is_empty(),
        "found non-export content in mod.rs files: {violations:#?}"
    );
}

#[test]
fn llm_contract_lives_in_outbound_port() {
    assert!(
        path_exists("src/port/outbound/llm.rs"),
        "LLM trait contract should live under port/outbound"
    );

    for adapter in [
        "src/adapter/outbound/llm/anthropic.rs",
        "src/adapter/outbound/llm/openai.rs",
    ] {
        let source = read_relative(adapter);
        assert!(
            source.contains("crate::port::outbound::llm::Llm"),
            "{adapter} should implement the outbound llm port"
        );
    }
}

#[test]
fn cms_contract_is_split_into_read_and_write() {
    let source = read_relative("src/port/outbound/cms.rs");
    assert!(
        source.contains("pub trait ContentSource"),
        "CMS reads should be a ContentSource port"
    );
    assert!(
        source.contains("pub trait ContentWriter"),
        "slug patches should go through a separate ContentWriter port"
    );
}

#[test]
fn cli_handlers_are_dispatched_from_one_place() {
    let main = read_relative("src/main.rs");
    assert!(
        main.contains("cli::dispatch::execute"),
        "main should delegate command routing to the dispatch module"
    );
    assert!(
        !main.contains("Commands::"),
        "main should not match on individual commands"
    );
}
