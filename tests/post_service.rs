mod common;

use blogpessoal::model::EntityRef;
use blogpessoal::AppError;
use chrono::Utc;
use common::*;

#[tokio::test]
async fn create_assigns_id_timestamp_and_relations() {
    let state = test_state();
    let tema = seed_theme(&state, "Rust").await;
    let user = seed_user(&state, "ana@mail.com").await;

    let before = Utc::now();
    let mut input = post_input("Primeira postagem", tema.id);
    input.usuario = Some(EntityRef { id: user.id });
    let post = state.posts.create(input).await.unwrap();

    assert!(post.id > 0);
    assert!(post.data >= before);
    assert_eq!(post.data.offset().local_minus_utc(), -3 * 3600);
    assert_eq!(post.tema.as_ref().map(|t| t.id), Some(tema.id));
    assert_eq!(post.usuario.as_ref().map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn create_with_missing_theme_is_not_found_and_persists_nothing() {
    let state = test_state();
    let err = state.posts.create(post_input("Órfã", 99)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "Tema não encontrado!"));
    assert!(state.posts.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_missing_user_is_not_found() {
    let state = test_state();
    let tema = seed_theme(&state, "Rust").await;
    let mut input = post_input("x", tema.id);
    input.usuario = Some(EntityRef { id: 7 });
    let err = state.posts.create(input).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "Usuário não encontrado!"));
    assert!(state.posts.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn find_by_id_matches_or_fails() {
    let state = test_state();
    let tema = seed_theme(&state, "Rust").await;
    let a = state.posts.create(post_input("a", tema.id)).await.unwrap();
    let b = state.posts.create(post_input("b", tema.id)).await.unwrap();

    assert_eq!(state.posts.find_by_id(b.id).await.unwrap().id, b.id);
    assert_eq!(state.posts.find_by_id(a.id).await.unwrap().titulo, "a");
    let err = state.posts.find_by_id(1000).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "Postagem não encontrada!"));
}

#[tokio::test]
async fn title_search_is_case_insensitive_substring() {
    let state = test_state();
    let tema = seed_theme(&state, "Rust").await;
    for titulo in ["Abc journey", "xyz", "ABCD"] {
        state.posts.create(post_input(titulo, tema.id)).await.unwrap();
    }

    let found: Vec<String> = state
        .posts
        .find_all_by_titulo("abc")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.titulo)
        .collect();
    assert_eq!(found, vec!["Abc journey".to_string(), "ABCD".to_string()]);

    let hits = state.posts.find_all_by_titulo("abc").await.unwrap();
    assert!(hits.iter().all(|p| p.tema.is_some()));
    assert!(state.posts.find_all_by_titulo("nada").await.unwrap().is_empty());
}

#[tokio::test]
async fn update_requires_existing_post_and_theme() {
    let state = test_state();
    let tema = seed_theme(&state, "Rust").await;
    let outro = seed_theme(&state, "Go").await;
    let post = state.posts.create(post_input("antes", tema.id)).await.unwrap();

    let mut missing = post_input("x", tema.id);
    missing.id = Some(post.id + 100);
    assert!(matches!(state.posts.update(missing).await, Err(AppError::NotFound(_))));

    let mut bad_theme = post_input("x", 555);
    bad_theme.id = Some(post.id);
    assert!(matches!(state.posts.update(bad_theme).await, Err(AppError::NotFound(_))));
    assert_eq!(state.posts.find_by_id(post.id).await.unwrap().titulo, "antes");

    let mut no_id = post_input("x", tema.id);
    no_id.id = None;
    assert!(matches!(state.posts.update(no_id).await, Err(AppError::BadRequest(_))));

    let mut ok = post_input("depois", outro.id);
    ok.id = Some(post.id);
    let updated = state.posts.update(ok).await.unwrap();
    assert_eq!(updated.id, post.id);
    assert_eq!(updated.titulo, "depois");
    assert_eq!(updated.tema.map(|t| t.descricao), Some("Go".to_string()));
    assert!(updated.data >= post.data);
    assert_eq!(state.posts.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_removes_exactly_one_row() {
    let state = test_state();
    let tema = seed_theme(&state, "Rust").await;
    let a = state.posts.create(post_input("a", tema.id)).await.unwrap();
    let b = state.posts.create(post_input("b", tema.id)).await.unwrap();

    let err = state.posts.delete(b.id + 10).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(state.posts.find_all().await.unwrap().len(), 2);

    let res = state.posts.delete(a.id).await.unwrap();
    assert_eq!(res.affected, 1);
    let remaining: Vec<i64> = state.posts.find_all().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(remaining, vec![b.id]);
}

#[tokio::test]
async fn theme_referenced_by_posts_cannot_be_deleted() {
    let state = test_state();
    let tema = seed_theme(&state, "Rust").await;
    let post = state.posts.create(post_input("a", tema.id)).await.unwrap();

    assert!(matches!(state.themes.delete(tema.id).await, Err(AppError::Conflict(_))));
    assert!(state.themes.find_by_id(tema.id).await.is_ok());

    state.posts.delete(post.id).await.unwrap();
    assert_eq!(state.themes.delete(tema.id).await.unwrap().affected, 1);
    assert!(matches!(state.themes.find_by_id(tema.id).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn theme_crud_and_search() {
    let state = test_state();
    let rust = seed_theme(&state, "Rust").await;
    seed_theme(&state, "Trust issues").await;
    seed_theme(&state, "Go").await;

    let hits: Vec<String> = state
        .themes
        .find_all_by_descricao("RUST")
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.descricao)
        .collect();
    assert_eq!(hits, vec!["Rust".to_string(), "Trust issues".to_string()]);

    let mut input = theme_input("Rust 2024");
    input.id = Some(rust.id);
    let updated = state.themes.update(input).await.unwrap();
    assert_eq!(updated.id, rust.id);
    assert_eq!(state.themes.find_by_id(rust.id).await.unwrap().descricao, "Rust 2024");

    let mut ghost = theme_input("x");
    ghost.id = Some(999);
    assert!(matches!(state.themes.update(ghost).await, Err(AppError::NotFound(_))));
    assert_eq!(state.themes.find_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn update_without_usuario_keeps_the_author() {
    let state = test_state();
    let tema = seed_theme(&state, "Rust").await;
    let ana = seed_user(&state, "ana@mail.com").await;
    let bia = seed_user(&state, "bia@mail.com").await;

    let mut input = post_input("Com autora", tema.id);
    input.usuario = Some(EntityRef { id: ana.id });
    let post = state.posts.create(input).await.unwrap();

    let mut edit = post_input("Editada", tema.id);
    edit.id = Some(post.id);
    let updated = state.posts.update(edit).await.unwrap();
    assert_eq!(updated.titulo, "Editada");
    assert_eq!(updated.usuario.as_ref().map(|u| u.id), Some(ana.id));

    let mut reassign = post_input("Editada", tema.id);
    reassign.id = Some(post.id);
    reassign.usuario = Some(EntityRef { id: bia.id });
    let updated = state.posts.update(reassign).await.unwrap();
    assert_eq!(updated.usuario.map(|u| u.id), Some(bia.id));
}
