//! Client calls against a local HTTP listener serving canned JSON.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

use super::ApiClient;
use crate::error::AppError;
use crate::models::Presenca;
use crate::state::executor::register_now;
use crate::state::forms::QuickRegister;
use crate::state::lookup::resolve_attendance;
use crate::state::{ListState, execute};

#[derive(Debug, Clone)]
struct Received {
    method: String,
    path: String,
    body: String,
}

/// Answers `"METHOD /path"` routes with a JSON body; anything else is a 404.
struct FakeServer {
    base_url: String,
    received: Arc<Mutex<Vec<Received>>>,
}

impl FakeServer {
    async fn start(routes: &[(&str, &str)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: Arc<HashMap<String, String>> = Arc::new(
            routes
                .iter()
                .map(|(route, body)| (route.to_string(), body.to_string()))
                .collect(),
        );
        let received = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&received);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                tokio::spawn(async move { serve(stream, &routes, &log).await });
            }
        });

        Self {
            base_url: format!("http://{addr}/api"),
            received,
        }
    }

    fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

/// Handle one request and close the connection.
async fn serve(mut stream: TcpStream, routes: &HashMap<String, String>, log: &Mutex<Vec<Received>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line
        .next()
        .unwrap_or_default()
        .split('?')
        .next()
        .unwrap_or_default()
        .to_string();
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    let (status, payload) = match routes.get(&format!("{method} {path}")) {
        Some(payload) => ("200 OK", payload.as_str()),
        None => ("404 Not Found", ""),
    };
    log.lock().unwrap().push(Received { method, path, body });

    let reply = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    );
    let _ = stream.write_all(reply.as_bytes()).await;
    let _ = stream.shutdown().await;
}

const TURMA_A: &str = r#"{"id":1,"nome":"Turma A","codigo":"TA","ativa":true}"#;
const ANA: &str = r#"{"id":10,"nome":"Ana","matricula":"2024001","email":"ana@escola.com","turmaId":1,"ativo":true}"#;
const BRUNO: &str =
    r#"{"id":11,"nome":"Bruno","matricula":"2024002","email":"bruno@escola.com","turmaId":1,"ativo":false}"#;
const PRESENCAS: &str = r#"[
    {"id":1,"alunoId":10,"turmaId":1,"dataPresenca":"2024-05-02","horaPresenca":"08:00:00"},
    {"id":2,"alunoId":11,"turmaId":1,"dataPresenca":"2024-05-02","horaPresenca":"08:05:00"}
]"#;

#[tokio::test]
async fn test_attendance_of_deactivated_student_keeps_name() {
    let active = format!("[{ANA}]");
    let everyone = format!("[{ANA},{BRUNO}]");
    let turmas = format!("[{TURMA_A}]");
    let server = FakeServer::start(&[
        ("GET /api/presencas", PRESENCAS),
        ("GET /api/alunos", active.as_str()),
        ("GET /api/alunos/todos", everyone.as_str()),
        ("GET /api/turmas", turmas.as_str()),
        ("GET /api/turmas/todas", turmas.as_str()),
    ])
    .await;
    let client = ApiClient::new(&server.base_url).unwrap();

    let mut page = ListState::<Presenca>::new();
    let command = page.load();
    let event = execute(&client, command, &CancellationToken::new()).await;
    page.apply(event);

    assert_eq!(page.records.len(), 2);
    let names = resolve_attendance(&page.records[1], &page.lookup.alunos, &page.lookup.turmas);
    assert_eq!(names.aluno_nome, "Bruno");
    assert_eq!(names.aluno_matricula, "2024002");
    assert_eq!(names.turma_nome, "Turma A");

    page.filter.termo = "bruno".into();
    let ids: Vec<_> = page.filtered_view().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn test_each_quick_register_click_posts_once() {
    let created = r#"{"id":3,"alunoId":11,"turmaId":2,"dataPresenca":"2024-05-02","horaPresenca":"08:10:00"}"#;
    let server = FakeServer::start(&[("POST /api/presencas/rapida", created)]).await;
    let client = ApiClient::new(&server.base_url).unwrap();
    let quick = QuickRegister { turma_id: Some(2) };
    let token = CancellationToken::new();

    for _ in 0..2 {
        let request = quick.request(11).unwrap();
        register_now(&client, request, &token).await.unwrap();
    }

    let received = server.received();
    assert_eq!(received.len(), 2);
    for request in received {
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/presencas/rapida");
        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body, json!({"alunoId": 11, "turmaId": 2}));
    }
}

#[tokio::test]
async fn test_cancelled_quick_register_sends_nothing() {
    let server = FakeServer::start(&[]).await;
    let client = ApiClient::new(&server.base_url).unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let request = QuickRegister { turma_id: Some(2) }.request(11).unwrap();
    let result = register_now(&client, request, &token).await;
    assert!(matches!(result, Err(AppError::Cancelled)));
    assert!(server.received().is_empty());
}
