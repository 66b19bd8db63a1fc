use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::{InMemoryStudentRepository, StudentRepository};
use tokio::net::TcpListener;

use server::startup::build_app;

struct TestApp {
    base_url: String,
}

async fn start_server(base_path: &str) -> anyhow::Result<TestApp> {
    let mut cfg = configs::AppConfig::default();
    cfg.server.base_path = base_path.to_string();
    let repo: Arc<dyn StudentRepository> = Arc::new(InMemoryStudentRepository::new());
    let app = build_app(&cfg, repo);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}{}", addr.ip(), addr.port(), base_path);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn create(app: &TestApp, body: Value) -> anyhow::Result<String> {
    let res = client().post(format!("{}/students", app.base_url)).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    let id = body["id"].as_str().expect("id string").to_string();
    Ok(id)
}

fn student(name: &str, age: i64, city: &str, country: &str) -> Value {
    json!({"name": name, "age": age, "address": {"city": city, "country": country}})
}

#[tokio::test]
async fn e2e_ann_lifecycle() -> anyhow::Result<()> {
    let app = start_server("").await?;
    let c = client();

    let res = c.post(format!("{}/students", app.base_url))
        .json(&student("Ann", 21, "Lima", "Peru"))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created.as_object().map(|o| o.len()), Some(1));
    let id = created["id"].as_str().expect("id").to_string();

    let res = c.get(format!("{}/students/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["name"], "Ann");
    assert_eq!(body["age"], 21);
    assert_eq!(body["address"], json!({"city": "Lima", "country": "Peru"}));

    let res = c.get(format!("{}/students?country=Peru", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let list = res.json::<Vec<Value>>().await?;
    assert!(list.contains(&json!({"name": "Ann", "age": 21})));

    let res = c.get(format!("{}/students?age=22", app.base_url)).send().await?;
    let list = res.json::<Vec<Value>>().await?;
    assert!(!list.iter().any(|s| s["name"] == "Ann"));

    let res = c.patch(format!("{}/students/{}", app.base_url, id))
        .json(&json!({"age": 22}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let body = c.get(format!("{}/students/{}", app.base_url, id)).send().await?.json::<Value>().await?;
    assert_eq!(body["age"], 22);
    assert_eq!(body["name"], "Ann");

    let res = c.delete(format!("{}/students/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({}));

    let res = c.get(format!("{}/students/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_error_statuses() -> anyhow::Result<()> {
    let app = start_server("").await?;
    let c = client();
    let id = create(&app, student("Ann", 21, "Lima", "Peru")).await?;

    // empty mapping and missing body
    let res = c.patch(format!("{}/students/{}", app.base_url, id)).json(&json!({})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let res = c.patch(format!("{}/students/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.patch(format!("{}/students/{}", app.base_url, id)).json(&json!({"grade": "A"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    let res = c.patch(format!("{}/students/{}", app.base_url, id)).json(&json!({"age": "old"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

    let never = "65f0c0ffee0000000000beef";
    let res = c.delete(format!("{}/students/{}", app.base_url, never)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.patch(format!("{}/students/{}", app.base_url, never)).json(&json!({"age": 1})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.get(format!("{}/students/bad-id", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Validation Error");

    let res = c.get(format!("{}/students?age=abc", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn e2e_create_requires_every_field() -> anyhow::Result<()> {
    let app = start_server("").await?;
    let c = client();
    let bad_bodies = [
        json!({"age": 21, "address": {"city": "Lima", "country": "Peru"}}),
        json!({"name": "Ann", "address": {"city": "Lima", "country": "Peru"}}),
        json!({"name": "Ann", "age": 21}),
        json!({"name": "Ann", "age": 21, "address": {"city": "Lima"}}),
        json!({"name": "Ann", "age": "21", "address": {"city": "Lima", "country": "Peru"}}),
    ];
    for body in bad_bodies {
        let res = c.post(format!("{}/students", app.base_url)).json(&body).send().await?;
        assert_eq!(res.status(), HttpStatusCode::UNPROCESSABLE_ENTITY, "body: {body}");
    }
    let res = c.get(format!("{}/students", app.base_url)).send().await?;
    assert!(res.json::<Vec<Value>>().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_list_filters_hold() -> anyhow::Result<()> {
    let app = start_server("").await?;
    let c = client();
    let seed = [
        student("Ann", 21, "Lima", "Peru"),
        student("Bea", 19, "Cusco", "Peru"),
        student("Carl", 35, "Quito", "Ecuador"),
        student("Dan", 0, "Lima", "Peru"),
    ];
    for s in &seed {
        create(&app, s.clone()).await?;
    }

    let all = c.get(format!("{}/students", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(all.len(), seed.len());
    assert!(all.iter().all(|s| s.get("address").is_none() && s.get("id").is_none() && s.get("_id").is_none()));

    let empty = c.get(format!("{}/students?country=&age=", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(empty.len(), seed.len());

    let adults = c.get(format!("{}/students?age=20", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert!(adults.iter().all(|s| s["age"].as_i64().unwrap_or(-1) >= 20));
    assert_eq!(adults.len(), 2);

    let from_zero = c.get(format!("{}/students?age=0", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(from_zero.len(), seed.len());

    let peru_adults = c.get(format!("{}/students?country=Peru&age=20", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(peru_adults, vec![json!({"name": "Ann", "age": 21})]);

    let nowhere = c.get(format!("{}/students?country=peru", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert!(nowhere.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_address_is_replaced_whole() -> anyhow::Result<()> {
    let app = start_server("/api").await?;
    let c = client();
    let id = create(&app, student("Ann", 21, "Lima", "Peru")).await?;

    let res = c.patch(format!("{}/students/{}", app.base_url, id))
        .json(&json!({"address": {"city": "Cusco"}}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

    let res = c.patch(format!("{}/students/{}", app.base_url, id))
        .json(&json!({"address": {"city": "Quito", "country": "Ecuador"}, "name": "Anna"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let body = c.get(format!("{}/students/{}", app.base_url, id)).send().await?.json::<Value>().await?;
    assert_eq!(body, json!({
        "id": id,
        "name": "Anna",
        "age": 21,
        "address": {"city": "Quito", "country": "Ecuador"}
    }));
    Ok(())
}
