mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use bookshelf::http;
use bookshelf::persistence::InMemoryDatabase;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const CONTACT: &str = "ops@bookshelf.test";

fn app() -> Router {
    let db = InMemoryDatabase::new();
    http::router(Arc::new(common::container(&db)), CONTACT)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn author() -> Value {
    json!({ "first_name": "Ursula", "last_name": "Le Guin", "age": 88 })
}

fn book(isbn: &str) -> Value {
    json!({
        "title": "The Dispossessed",
        "isbn": isbn,
        "pages": 387,
        "price": 1599,
        "publication_year": 1974,
    })
}

#[tokio::test]
async fn adding_an_author_updates_both_sides() {
    let app = app();

    let (status, author_id) = send(&app, Method::POST, "/authors", Some(author())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, book_id) = send(&app, Method::POST, "/books", Some(book("0060512756"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/books/{book_id}/authors/{author_id}");
    let (status, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));

    let (status, found) = send(&app, Method::GET, &format!("/authors/{author_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["books"], json!([book_id]));
    assert_eq!(found["last_name"], "Le Guin");

    let (_, found) = send(&app, Method::GET, &format!("/books/{book_id}"), None).await;
    assert_eq!(found["authors"], json!([author_id]));
}

#[tokio::test]
async fn find_by_title_matches_exactly() {
    let app = app();
    send(&app, Method::POST, "/books", Some(book("0060512756"))).await;
    send(&app, Method::POST, "/books", Some(book("0061054887"))).await;

    let (status, books) = send(&app, Method::GET, "/books?title=The%20Dispossessed", None).await;
    assert_eq!(status, StatusCode::OK);
    let isbns: Vec<&str> = books
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["isbn"].as_str().unwrap())
        .collect();
    assert_eq!(isbns, ["0060512756", "0061054887"]);

    let (_, none) = send(&app, Method::GET, "/books?title=Dispossessed", None).await;
    assert_eq!(none, json!([]));

    let (status, _) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_isbn_conflicts() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/books", Some(book("0060512756"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/books", Some(book("0060512756"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn adding_the_same_author_twice_conflicts() {
    let app = app();
    let (_, author_id) = send(&app, Method::POST, "/authors", Some(author())).await;
    let (_, book_id) = send(&app, Method::POST, "/books", Some(book("0060512756"))).await;
    let uri = format!("/books/{book_id}/authors/{author_id}");

    let (status, _) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, found) = send(&app, Method::GET, &format!("/authors/{author_id}"), None).await;
    assert_eq!(found["books"], json!([book_id]));
}

#[tokio::test]
async fn invalid_data_is_rejected_with_details() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/books", Some(book("123"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "invalid:data");
    assert_eq!(body["description"], "wrong value");
    assert_eq!(body["extra"][0]["field"], "isbn");

    let (status, body) = send(&app, Method::POST, "/authors", Some(json!({ "age": 3 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "invalid:data");

    let (status, _) = send(&app, Method::GET, "/books/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut leaflet = book("0060512756");
    leaflet["pages"] = json!(1);
    let (status, body) = send(&app, Method::POST, "/books", Some(leaflet)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["extra"][0]["field"], "pages");
}

#[tokio::test]
async fn unknown_resources_are_not_found() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/books/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, "/authors/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/books/42/authors/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_book() {
    let app = app();
    let (_, book_id) = send(&app, Method::POST, "/books", Some(book("0060512756"))).await;
    let uri = format!("/books/{book_id}");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 删除不存在的书籍同样成功
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // ISBN 释放后可以重新使用
    let (status, _) = send(&app, Method::POST, "/books", Some(book("0060512756"))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn unknown_author_is_rejected_before_the_book_commits() {
    let app = app();
    let (_, book_id) = send(&app, Method::POST, "/books", Some(book("0060512756"))).await;

    let (status, body) = send(&app, Method::POST, &format!("/books/{book_id}/authors/999"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);

    let (_, found) = send(&app, Method::GET, &format!("/books/{book_id}"), None).await;
    assert_eq!(found["authors"], json!([]));
}
