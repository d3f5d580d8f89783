mod common;

use std::sync::Arc;

use anyhow::Result;
use common::test_sqlite_repo;
use lancamentos::application::{AppError, UserService};
use lancamentos::storage::InMemoryRepository;

#[tokio::test]
async fn test_register_user() -> Result<()> {
    let (repo, _temp) = test_sqlite_repo().await?;
    let users = UserService::new(repo);

    let user = users
        .register("Ana".into(), "ana@example.com".into())
        .await?;

    assert!(user.id.is_some());
    assert_eq!(user.name, "Ana");
    assert_eq!(user.email, "ana@example.com");

    let found = users.find_by_id(user.id.unwrap()).await?;
    assert_eq!(found.map(|u| u.email), Some("ana@example.com".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_email_fails() -> Result<()> {
    let users = UserService::new(Arc::new(InMemoryRepository::new()));

    users.register("Ana".into(), "ana@example.com".into()).await?;
    let err = users
        .register("Another Ana".into(), "ana@example.com".into())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UserAlreadyExists(email) if email == "ana@example.com"));
    Ok(())
}

#[tokio::test]
async fn test_validate_email() -> Result<()> {
    let users = UserService::new(Arc::new(InMemoryRepository::new()));

    users.validate_email("free@example.com").await?;
    users.register("Bia".into(), "bia@example.com".into()).await?;
    assert!(users.validate_email("bia@example.com").await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_missing_user() -> Result<()> {
    let users = UserService::new(Arc::new(InMemoryRepository::new()));

    assert!(users.find_by_id(7).await?.is_none());
    assert!(matches!(users.get(7).await, Err(AppError::UserNotFound(7))));
    Ok(())
}
