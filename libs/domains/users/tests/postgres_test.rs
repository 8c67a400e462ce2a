use domain_users::{
    CreateUser, InMemoryEventPublisher, PgUserRepository, UserError, UserRepository, UserService,
};
use test_utils::{TestDataBuilder, TestDatabase};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_list_delete_against_tb_user() {
    let db = TestDatabase::new().await;
    let data = TestDataBuilder::from_test_name("tb_user_lifecycle");
    let publisher = InMemoryEventPublisher::new();
    let service = UserService::new(PgUserRepository::new(db.connection()), publisher.clone());

    let created = service
        .create_user(CreateUser::new(data.name("Ana"), data.email("ana")))
        .await
        .unwrap();

    let users = PgUserRepository::new(db.connection()).list().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_id, created.user_id);
    assert_eq!(publisher.published().await.len(), 1);

    service.delete_user(created.user_id).await.unwrap();
    let again = service.delete_user(created.user_id).await;
    assert!(matches!(again, Err(UserError::NotFound(_))));
}
