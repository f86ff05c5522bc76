//! Library integration tests.

use sitewise::SitewiseError;

#[test]
fn error_types_are_public() {
    let err = SitewiseError::UnknownEnvironment {
        name: "test".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> sitewise::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use sitewise::cli::{Cli, Commands};

    let cli = Cli::parse_from(["sitewise", "detect", "--json"]);

    if let Some(Commands::Detect(args)) = cli.command {
        assert!(args.json);
        assert!(!args.scores);
    } else {
        panic!("Expected Detect command");
    }
}

#[test]
fn site_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<sitewise::Site>();
    assert_send_sync::<sitewise::paths::ResolvedPaths>();
}
