//! End-to-end tests: load a TOML file, bind it, build objects from the paths.

use inject_config::{
    BinderOptions, Config, ConfigBinder, ConfigSource, ConfigTree, Container, Error, Injector,
    Value,
};
use std::io::Write;
use tempfile::NamedTempFile;

const DEFAULT_TOML: &str = r#"
[app.db]
host = "localhost"
port = 1234
seeds = ["8.8.8.8", "8.8.4.4"]
debug = true
"#;

fn fixture() -> (NamedTempFile, ConfigTree) {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{DEFAULT_TOML}").unwrap();
    let tree = Config::builder().with_file(file.path(), true).load().unwrap();
    (file, tree)
}

fn joined(deps: &[Value]) -> String {
    deps.iter().map(ToString::to_string).collect::<Vec<_>>().join(":")
}

fn seeds_with_port(deps: &[Value]) -> String {
    let port = &deps[1];
    deps[0]
        .as_sequence()
        .unwrap_or_default()
        .iter()
        .map(|seed| format!("{seed}:{port}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[test]
fn test_default_options_bind_full_paths() {
    let (_file, config) = fixture();
    let container = Container::new();

    let mut bound = ConfigBinder::new(&config, BinderOptions::default())
        .unwrap()
        .bind(Some(container));

    let db: String = bound
        .container
        .bind_name("db")
        .to_object(Injector::new(["app.db.host", "app.db.port", "app.db.debug"], joined))
        .new_object("db")
        .unwrap();
    assert_eq!(db, "localhost:1234:true");
}

#[test]
fn test_different_root() {
    let (_file, config) = fixture();

    let mut bound = ConfigBinder::new(&config, BinderOptions::new().root("app"))
        .unwrap()
        .bind::<Container>(None);

    let db: String = bound
        .container
        .bind_name("db")
        .to_object(Injector::new(["db.host", "db.port"], joined))
        .new_object("db")
        .unwrap();
    assert_eq!(db, "localhost:1234");
    assert!(!bound.container.contains("app.db.host"));
}

#[test]
fn test_custom_prefix() {
    let (_file, config) = fixture();

    let mut bound = ConfigBinder::new(&config, BinderOptions::new().root("app").prefix("cfg"))
        .unwrap()
        .bind::<Container>(None);

    let db: String = bound
        .container
        .bind_name("db")
        .to_object(Injector::new(["cfg.db.host", "cfg.db.port"], joined))
        .new_object("db")
        .unwrap();
    assert_eq!(db, "localhost:1234");
}

#[test]
fn test_arrays() {
    let (_file, config) = fixture();
    let options = BinderOptions::new()
        .root("app")
        .prefix("cfg")
        .log(true)
        .type_hint("cfg.db.seeds", "string");

    let mut bound = ConfigBinder::new(&config, options)
        .unwrap()
        .bind::<Container>(None);

    let db: String = bound
        .container
        .bind_name("db")
        .to_object(Injector::new(["cfg.db.seeds", "cfg.db.port"], seeds_with_port))
        .new_object("db")
        .unwrap();
    assert_eq!(db, "8.8.8.8:1234,8.8.4.4:1234");

    let logs = bound.logs.unwrap();
    assert!(logs.contains(&"Binding cfg.db.seeds to string[] 8.8.8.8,8.8.4.4".to_string()));
}

#[test]
fn test_entire_objects() {
    let (_file, config) = fixture();
    let options = BinderOptions::new().objects(true).log(true);

    let mut bound = ConfigBinder::new(&config, options)
        .unwrap()
        .bind::<Container>(None);

    let db: String = bound
        .container
        .bind_name("db")
        .to_object(Injector::new(["app.db"], |deps| serde_json::to_string(&deps[0]).unwrap()))
        .new_object("db")
        .unwrap();
    assert_eq!(
        db,
        r#"{"host":"localhost","port":1234,"seeds":["8.8.8.8","8.8.4.4"],"debug":true}"#
    );
    assert_eq!(
        bound.container.resolve("app.db").unwrap(),
        &config.get("app.db").unwrap()
    );

    let logs = bound.logs.unwrap();
    assert_eq!(logs.len(), 7);
    assert_eq!(logs[2], "Binding app.db to Object [object Object]");
}

#[test]
fn test_objects_at_prefix_round_trip() {
    let (_file, config) = fixture();
    let options = BinderOptions::new().root("app.db").prefix("db").objects(true);

    let bound = ConfigBinder::new(&config, options)
        .unwrap()
        .bind::<Container>(None);

    let whole = bound.container.resolve("db").unwrap();
    assert_eq!(whole, &config.get("app.db").unwrap());
    assert_eq!(bound.container.resolve("db.port").unwrap().as_i64(), Some(1234));
}

#[test]
fn test_missing_root_is_an_error() {
    let (_file, config) = fixture();

    let result = ConfigBinder::new(&config, BinderOptions::new().root("cache"));

    assert!(matches!(result, Err(Error::RootNotFound(ref root)) if root == "cache"));
}

#[test]
fn test_env_overrides_reach_the_container() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{DEFAULT_TOML}").unwrap();
    std::env::set_var("INJECT_CONFIG_TEST__APP__DB__PORT", "5432");

    let config = Config::builder()
        .with_file(file.path(), true)
        .with_env("INJECT_CONFIG_TEST", "__")
        .load()
        .unwrap();
    std::env::remove_var("INJECT_CONFIG_TEST__APP__DB__PORT");

    let bound = ConfigBinder::new(&config, BinderOptions::new().root("app.db"))
        .unwrap()
        .bind::<Container>(None);
    assert_eq!(bound.container.resolve("port").unwrap().as_i64(), Some(5432));
    assert_eq!(
        bound.container.resolve("host").unwrap().as_str(),
        Some("localhost")
    );
}

#[test]
fn test_options_loaded_from_config_section() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{DEFAULT_TOML}
[binder]
root = "app"
prefix = "cfg"
log = true

[binder.type_hints]
"cfg.db.seeds" = "string"
"#
    )
    .unwrap();

    let config = Config::builder().with_file(file.path(), true).load().unwrap();
    let options: BinderOptions = config.section("binder").unwrap();

    let bound = ConfigBinder::new(&config, options)
        .unwrap()
        .bind::<Container>(None);
    assert_eq!(
        bound.logs.unwrap(),
        [
            "Binding cfg.db.host to string localhost",
            "Binding cfg.db.port to number 1234",
            "Binding cfg.db.seeds to string[] 8.8.8.8,8.8.4.4",
            "Binding cfg.db.debug to boolean true",
        ]
    );
}

#[test]
fn test_typed_read_of_bound_object() {
    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Db {
        host: String,
        port: u16,
        debug: bool,
    }

    let (_file, config) = fixture();
    let bound = ConfigBinder::new(&config, BinderOptions::new().objects(true))
        .unwrap()
        .bind::<Container>(None);

    let db: Db = bound
        .container
        .resolve("app.db")
        .unwrap()
        .deserialize_into()
        .unwrap();
    assert_eq!(
        db,
        Db {
            host: "localhost".into(),
            port: 1234,
            debug: true,
        }
    );
}
