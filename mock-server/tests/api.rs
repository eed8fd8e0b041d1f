use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Catalog, Page, Pokemon};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_returns_page_in_catalog_order() {
    let resp = app().oneshot(get("/pokemon")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Page = body_json(resp).await;
    assert_eq!(page.count, 5);
    assert!(page.next.is_none());
    assert_eq!(page.results[0].name, "bulbasaur");
    assert_eq!(page.results[1].name, "ivysaur");
    assert_eq!(page.results[4].name, "pikachu");
}

#[tokio::test]
async fn list_empty_catalog() {
    let resp = app_with(Catalog::default()).oneshot(get("/pokemon")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Page = body_json(resp).await;
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn list_forced_failure() {
    let resp = app_with(Catalog::failing(500)).oneshot(get("/pokemon")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn list_malformed_body() {
    let resp = app_with(Catalog::malformed()).oneshot(get("/pokemon")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<Page>(&bytes).is_err());
}

// --- detail ---

#[tokio::test]
async fn get_pokemon_by_name() {
    let resp = app().oneshot(get("/pokemon/pikachu")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let pokemon: Pokemon = body_json(resp).await;
    assert_eq!(pokemon.name, "pikachu");
    assert_eq!(pokemon.height, 4);
    assert_eq!(pokemon.weight, 60);
    assert!(pokemon.sprites.front_default.unwrap().ends_with("/25.png"));
}

#[tokio::test]
async fn get_pokemon_not_found() {
    let resp = app().oneshot(get("/pokemon/missingno")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(&body_bytes(resp).await[..], b"Not Found");
}

#[tokio::test]
async fn get_pokemon_forced_failure() {
    let resp = app_with(Catalog::failing(503))
        .oneshot(get("/pokemon/pikachu"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app().oneshot(get("/berries")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
