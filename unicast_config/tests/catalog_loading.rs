//! Loading catalogs from declaration documents and computing their content.

use std::path::Path;

use anyhow::{Result, ensure};
use pretty_assertions::assert_eq;
use rstest::rstest;
use test_helpers::document::list_block;
use test_helpers::figment::{figment_error, with_jail};
use test_helpers::result::ToAnyhow;
use unicast_config::{Catalog, CatalogFormat, UnicastError};

const TOML_CATALOG: &str = r#"
[[config]]
name = "/etc/elasticsearch/logs.yml"
cluster = "logs"
mode = "0640"

[config.config_hash]
"cluster.name" = "logs"
"discovery.zen.minimum_master_nodes" = 2

[[config]]
name = "metrics"
path = "/etc/elasticsearch/metrics.yml"

[[unicast_node]]
cluster = "logs"
ipaddress = "10.0.0.1"

[[unicast_node]]
cluster = "metrics"
ipaddress = "10.0.1.1"

[[unicast_node]]
cluster = "logs"
ipaddress = "10.0.0.2"
"#;

const JSON_CATALOG: &str = r#"{
  "config": [
    {"name": "logs.yml", "cluster": "logs", "config_hash": {"node.master": true}}
  ],
  "unicast_node": [
    {"cluster": "logs", "ipaddress": "10.0.0.7"}
  ]
}"#;

#[rstest]
fn toml_catalog_declares_resources_and_nodes() -> Result<()> {
    let catalog = with_jail(|jail| {
        jail.create_file("catalog.toml", TOML_CATALOG)?;
        Catalog::load(Path::new("catalog.toml")).map_err(figment_error)
    })?;
    assert_eq!(catalog.resources().len(), 2);
    assert_eq!(catalog.nodes().len(), 3);
    assert_eq!(catalog.peers_for("logs").as_slice(), ["10.0.0.1", "10.0.0.2"]);

    let metrics = catalog
        .resource("metrics")
        .ok_or_else(|| anyhow::anyhow!("metrics resource missing"))?;
    assert_eq!(metrics.path().as_str(), "/etc/elasticsearch/metrics.yml");
    assert_eq!(metrics.mode().to_anyhow()?, 0o644);
    ensure!(metrics.cluster().is_none(), "metrics declares no cluster");
    Ok(())
}

#[rstest]
fn catalog_resource_renders_with_its_cluster_peers() -> Result<()> {
    let catalog = Catalog::from_str_with_format(TOML_CATALOG, CatalogFormat::Toml).to_anyhow()?;
    let logs = catalog
        .resource("/etc/elasticsearch/logs.yml")
        .ok_or_else(|| anyhow::anyhow!("logs resource missing"))?;
    assert_eq!(logs.mode().to_anyhow()?, 0o640);

    let content = logs.expected_content(&catalog).to_anyhow()?;
    let expected = format!(
        "## GENERATED BY PUPPET ##\n---\ncluster: \n  name: logs\ndiscovery: \n  zen: \n    minimum_master_nodes: 2\n    ping: \n      unicast: \n{}",
        list_block(4, "hosts", &["10.0.0.1", "10.0.0.2"])
    );
    assert_eq!(content, expected);
    Ok(())
}

#[rstest]
fn resource_without_settings_reports_both() -> Result<()> {
    let catalog = Catalog::from_str_with_format(TOML_CATALOG, CatalogFormat::Toml).to_anyhow()?;
    let metrics = catalog
        .resource("metrics")
        .ok_or_else(|| anyhow::anyhow!("metrics resource missing"))?;
    let err = metrics
        .expected_content(&catalog)
        .expect_err("cluster and config_hash are required");
    let UnicastError::Aggregate(errors) = &*err else {
        panic!("expected aggregate error, got {err:?}");
    };
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "Required setting 'cluster' missing",
            "Required setting 'config_hash' missing",
        ]
    );
    Ok(())
}

#[rstest]
fn json_catalog_is_selected_by_extension() -> Result<()> {
    let catalog = with_jail(|jail| {
        jail.create_file("catalog.json", JSON_CATALOG)?;
        Catalog::load(Path::new("catalog.json")).map_err(figment_error)
    })?;
    let resource = catalog
        .resource("logs.yml")
        .ok_or_else(|| anyhow::anyhow!("resource missing"))?;
    let content = resource.expected_content(&catalog).to_anyhow()?;
    ensure!(content.contains("node: \n  master: true\n"), "{content}");
    ensure!(content.contains("- 10.0.0.7\n"), "{content}");
    Ok(())
}

#[cfg(feature = "yaml")]
#[rstest]
fn yaml_catalog_is_selected_by_extension() -> Result<()> {
    let yaml = "config:\n  - name: logs.yml\n    cluster: logs\n    config_hash:\n      cluster.name: logs\nunicast_node:\n  - cluster: logs\n    ipaddress: 10.0.0.9\n";
    let catalog = with_jail(|jail| {
        jail.create_file("catalog.yml", yaml)?;
        Catalog::load(Path::new("catalog.yml")).map_err(figment_error)
    })?;
    assert_eq!(catalog.peers_for("logs").as_slice(), ["10.0.0.9"]);
    Ok(())
}

#[rstest]
#[case::broken_toml("catalog.toml", "[[config]\nname = ")]
#[case::broken_json("catalog.json", "{\"config\": [")]
#[case::wrong_shape("catalog.toml", "config = \"not a list\"")]
fn malformed_catalogs_are_rejected(#[case] file: &str, #[case] contents: &str) -> Result<()> {
    let result = with_jail(|jail| {
        jail.create_file(file, contents)?;
        Ok(Catalog::load(Path::new(file)))
    })?;
    let Err(err) = result else {
        anyhow::bail!("{file} should not load");
    };
    ensure!(
        matches!(
            &*err,
            UnicastError::File { .. } | UnicastError::Gathering(_)
        ),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[rstest]
fn missing_catalog_file_is_a_file_error() {
    let err = Catalog::load(Path::new("/nonexistent/catalog.toml"))
        .expect_err("catalog does not exist");
    assert!(matches!(&*err, UnicastError::File { .. }));
}

#[rstest]
fn peers_for_keeps_duplicate_addresses() -> Result<()> {
    let catalog = Catalog::from_str_with_format(
        "[[unicast_node]]\ncluster = \"logs\"\nipaddress = \"10.0.0.1\"\n\n[[unicast_node]]\ncluster = \"logs\"\nipaddress = \"10.0.0.1\"\n",
        CatalogFormat::Toml,
    )
    .to_anyhow()?;
    assert_eq!(catalog.peers_for("logs").as_slice(), ["10.0.0.1", "10.0.0.1"]);
    ensure!(catalog.peers_for("metrics").as_slice().is_empty(), "no metrics nodes declared");
    Ok(())
}

#[rstest]
fn strict_catalog_resource_rejects_malformed_keys() -> Result<()> {
    let document = r#"
[[config]]
name = "logs.yml"
cluster = "logs"
strict_keys = true

[config.config_hash]
"discovery..hosts" = "x"
"#;
    let catalog = Catalog::from_str_with_format(document, CatalogFormat::Toml).to_anyhow()?;
    let resource = catalog
        .resource("logs.yml")
        .ok_or_else(|| anyhow::anyhow!("resource missing"))?;
    let err = resource
        .expected_content(&catalog)
        .expect_err("empty segment is rejected in strict mode");
    ensure!(
        matches!(&*err, UnicastError::MalformedKey { key, .. } if key == "discovery..hosts"),
        "unexpected error: {err:?}"
    );
    Ok(())
}
