use std::io::Write;

use ecommerce_dashboard::config::Config;
use ecommerce_dashboard::dashboard::Dashboard;
use ecommerce_dashboard::data::{clean::clean, loader};
use ecommerce_dashboard::server::{build_router, AppState};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const LISTINGS: &str = "\
Título,Preço,Qtd_Vendidos,Marca
Tênis corrida,299.9,+10mil,Nike
Camiseta,49.9,+1mil,Hering
Meia,19.9,+50,Lupo
Boné,89.0,sem vendas,Nike
Chuteira,399.0,+25mil,Adidas
Bermuda,79.9,5mil+,Adidas
";

async fn send_raw(addr: std::net::SocketAddr, path: &str) -> (u16, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let req = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, body.to_string())
}

#[tokio::test]
async fn serves_page_and_figures_from_a_csv_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("ecommerce_estatistica.csv");
    std::fs::File::create(&path)
        .and_then(|mut f| f.write_all(LISTINGS.as_bytes()))
        .expect("write csv");

    let dataset = loader::load_file(&path).expect("load");
    let cleaned = clean(dataset);
    assert_eq!(cleaned.len(), 5);
    assert_eq!(cleaned.dropped, 1);

    let dashboard = Dashboard::build(&cleaned, &Config::default());
    let app = build_router(AppState::new(&dashboard).expect("render"));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    let (status, page) = send_raw(addr, "/").await;
    assert_eq!(status, 200);
    assert!(page.contains("<h1>E-commerce Data Analysis</h1>"));
    assert_eq!(page.matches("class=\"chart\"").count(), 7);

    let (status, body) = send_raw(addr, "/figures.json").await;
    assert_eq!(status, 200);
    let figures: serde_json::Value = serde_json::from_str(&body).expect("figures json");

    // Adidas 30000, Nike 10000, Hering 1000; Lupo's 50 is under the bar threshold
    assert_eq!(
        figures["brand-sales-bar"]["data"][0]["x"],
        serde_json::json!(["Adidas", "Nike", "Hering"])
    );
    assert_eq!(
        figures["brand-sales-bar"]["data"][0]["y"],
        serde_json::json!([30000.0, 10000.0, 1000.0])
    );
    // Lupo is 50 / 41050 < 2 %, merged into "Other" and sorted by value
    assert_eq!(
        figures["brand-sales-pie"]["data"][0]["labels"],
        serde_json::json!(["Adidas", "Nike", "Hering", "Other"])
    );
    // only the 10mil and 25mil listings reach the regression threshold
    assert_eq!(
        figures["price-quantity-regression"]["data"][0]["x"],
        serde_json::json!([299.9, 399.0])
    );

    let (status, body) = send_raw(addr, "/health").await;
    assert_eq!((status, body.as_str()), (200, "ok"));

    let (status, _) = send_raw(addr, "/nope").await;
    assert_eq!(status, 404);
}
