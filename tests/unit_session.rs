mod common;

use common::{user_json, valid_token};
use swimdesk::AppContext;
use swimdesk_config::ClientConfig;
use swimdesk_models::UserProfile;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.session.state_file = dir.path().join("state").join("swimdesk.json");
    config
}

#[test]
fn test_session_and_tenant_survive_restart() {
    let dir = TempDir::new().unwrap();
    let token = valid_token();

    {
        let ctx = AppContext::open(config_in(&dir)).unwrap();
        let profile: UserProfile = serde_json::from_value(user_json("u7", "instructor")).unwrap();
        ctx.sessions.set_session(&token, profile).unwrap();
        ctx.tenants.set_tenant("  t9 ").unwrap();
    }

    let ctx = AppContext::open(config_in(&dir)).unwrap();
    let auth = ctx.auth();
    assert_eq!(auth.token.as_deref(), Some(token.as_str()));
    assert_eq!(auth.tenant_id.as_deref(), Some("t9"));
    assert_eq!(ctx.sessions.user().unwrap().id, "u7");
}

#[test]
fn test_logout_persists() {
    let dir = TempDir::new().unwrap();

    {
        let ctx = AppContext::open(config_in(&dir)).unwrap();
        let profile: UserProfile = serde_json::from_value(user_json("u7", "student")).unwrap();
        ctx.sessions.set_session(&valid_token(), profile).unwrap();
        ctx.tenants.set_tenant("t1").unwrap();
        ctx.logout().unwrap();
    }

    let ctx = AppContext::open(config_in(&dir)).unwrap();
    assert!(ctx.sessions.user().is_none());
    assert!(ctx.tenants.tenant().is_none());
}

#[test]
fn test_corrupt_state_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    std::fs::create_dir_all(config.session.state_file.parent().unwrap()).unwrap();
    std::fs::write(&config.session.state_file, "{not json").unwrap();

    assert!(AppContext::open(config).is_err());
}
