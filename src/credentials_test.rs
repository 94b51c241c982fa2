use anyhow::Result;

use crate::credentials::CredentialStore;

#[tokio::test]
async fn get_returns_none_for_a_missing_file() -> Result<()> {
    let tmpdir = tempfile::tempdir()?;
    let store = CredentialStore::new(tmpdir.path().join(".env"));
    assert!(store.get().await?.is_none(), "a missing credential file must yield no token");
    Ok(())
}

#[tokio::test]
async fn set_creates_the_file_when_absent() -> Result<()> {
    let tmpdir = tempfile::tempdir()?;
    let store = CredentialStore::new(tmpdir.path().join(".env"));
    store.set("tok-123").await?;
    assert_eq!(store.get().await?.as_deref(), Some("tok-123"), "the stored token must round-trip");
    Ok(())
}

#[tokio::test]
async fn set_updates_the_key_in_place_preserving_other_lines() -> Result<()> {
    let tmpdir = tempfile::tempdir()?;
    let path = tmpdir.path().join(".env");
    tokio::fs::write(&path, "OTHER_KEY=other\nEP_API_TOKEN=old\nTRAILING=1\n").await?;

    let store = CredentialStore::new(path.clone());
    store.set("new-token").await?;

    assert_eq!(store.get().await?.as_deref(), Some("new-token"), "the token must be updated");
    let contents = tokio::fs::read_to_string(&path).await?;
    assert!(contents.contains("OTHER_KEY=other"), "unrelated lines must be preserved, got:\n{}", contents);
    assert!(contents.contains("TRAILING=1"), "unrelated lines must be preserved, got:\n{}", contents);
    assert!(!contents.contains("EP_API_TOKEN=old"), "the old token must be gone, got:\n{}", contents);
    Ok(())
}

#[tokio::test]
async fn get_ignores_an_empty_token_value() -> Result<()> {
    let tmpdir = tempfile::tempdir()?;
    let path = tmpdir.path().join(".env");
    tokio::fs::write(&path, "EP_API_TOKEN=\n").await?;
    let store = CredentialStore::new(path);
    assert!(store.get().await?.is_none(), "an empty token value must be treated as absent");
    Ok(())
}
