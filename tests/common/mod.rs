#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CATEGORY: &str = "Componente -> Suporte a Sistemas";

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub pages: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        let pages = write_fixture_pages(tmp.path(), &fixture_pages());
        Self {
            _tmp: tmp,
            home,
            pages,
        }
    }

    pub fn with_pages(pages: &Value) -> Self {
        let env = Self::new();
        write_fixture_pages(env._tmp.path(), pages);
        env
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("pipereport");
        cmd.env("HOME", &self.home)
            .env("PIPEFY_API_URL", &self.pages)
            .env_remove("PIPEFY_KEY")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }
}

fn node(id: &str, title: &str, created_at: &str, cats: &[(&str, &str)], phase: &str) -> Value {
    json!({
        "node": {
            "id": id,
            "title": title,
            "fields": cats
                .iter()
                .map(|(n, v)| json!({"name": n, "value": v}))
                .collect::<Vec<_>>(),
            "current_phase": {"name": phase},
            "created_at": created_at
        }
    })
}

pub fn envelope(edges: Vec<Value>, has_next_page: bool, end_cursor: &str) -> Value {
    json!({
        "data": {
            "cards": {
                "edges": edges,
                "pageInfo": {"hasNextPage": has_next_page, "endCursor": end_cursor}
            }
        }
    })
}

/// Two recorded pages: three March cards in scope, one out-of-scope card,
/// one April card and one card with an unreadable creation date.
pub fn fixture_pages() -> Value {
    json!([
        envelope(
            vec![
                node("101", "Folha nao fecha", "2024-03-05T10:00:00-03:00", &[(CATEGORY, "Meu RH")], "Concluído"),
                node("102", "Erro no faturamento", "2024-03-20T08:00:00-03:00", &[(CATEGORY, "TOTVS Datasul")], "Triagem"),
                node("103", "Impressora", "2024-03-21T08:00:00-03:00", &[("Componente -> Infra", "Rede")], "Triagem"),
            ],
            true,
            "c1",
        ),
        envelope(
            vec![
                node("104", "Acesso ao portal", "2024-04-01T00:30:00-03:00", &[(CATEGORY, "Meu RH")], "Pendente"),
                node("105", "Relatorio quebrado", "31/03/2024", &[(CATEGORY, "Meu RH")], "Concluído"),
                node(
                    "106",
                    "Integracao",
                    "2024-03-31T23:00:00-03:00",
                    &[(CATEGORY, "Meu RH"), (CATEGORY, "TOTVS Datasul")],
                    "Em atendimento",
                ),
            ],
            false,
            "c2",
        ),
    ])
}

fn write_fixture_pages(base: &Path, pages: &Value) -> PathBuf {
    let path = base.join("pages.json");
    fs::write(
        &path,
        serde_json::to_string_pretty(pages).expect("serialize pages"),
    )
    .expect("write pages");
    path
}
