//! End-to-end runs of the quiz: answers in, result card data out.
//!
//! HTTP scenarios talk to a throwaway axum server on an ephemeral port.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use kbo_match_bot::quiz::{
    format_team_name, present, resolve, Advance, Catalog, Completion, HttpMatchService,
    MatchRequest, MatchResult, MatchService, RankTag, Score, Session, Step, SubmissionError,
    SubmissionTicket,
};

const PACING: Duration = Duration::from_millis(20);

fn answer_everything(session: &mut Session, score: u8) -> SubmissionTicket {
    let catalog = *session.catalog();
    let score = Score::new(score).unwrap();

    let mut ticket = None;
    for q in catalog.iter() {
        assert!(ticket.is_none(), "submitted before the last question");
        if let Advance::Submit(t) = session.answer(q.id, score).unwrap() {
            ticket = Some(t);
        }
    }
    ticket.expect("last answer should submit")
}

/// Serves `reply` for every POST and keeps the request bodies.
async fn spawn_matcher(
    reply: impl Fn() -> (StatusCode, String) + Clone + Send + Sync + 'static,
) -> (String, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_route = seen.clone();

    let router = Router::new().route(
        "/api/team-matching",
        post(move |Json(body): Json<Value>| {
            let seen = seen_by_route.clone();
            let reply = reply.clone();
            async move {
                seen.lock().unwrap().push(body);
                reply()
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}/api/team-matching"), seen)
}

fn service(endpoint: &str) -> HttpMatchService {
    HttpMatchService::new(endpoint, Duration::from_secs(5)).unwrap()
}

struct CountingService {
    calls: AtomicUsize,
    team: &'static str,
}

#[async_trait]
impl MatchService for CountingService {
    async fn submit(&self, _request: &MatchRequest) -> Result<MatchResult, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(MatchResult {
            team_label: self.team.to_string(),
            rationale: "테스트".to_string(),
            year: None,
        })
    }
}

#[tokio::test]
async fn scenario_a_current_team() {
    let (endpoint, seen) = spawn_matcher(|| {
        (
            StatusCode::OK,
            json!({ "teamName": "SSG", "reason": "짜릿한 홈런 야구를 좋아하시네요.", "score": 0.87 })
                .to_string(),
        )
    })
    .await;

    let mut session = Session::new(Catalog::standard(), 2024).unwrap();
    session.set_year(2020).unwrap();
    session.start().unwrap();
    let ticket = answer_everything(&mut session, 3);
    assert_eq!(session.step(), Step::Loading);

    let settlement = resolve(&service(&endpoint), ticket, PACING).await;
    assert_eq!(session.settle(settlement), Completion::Revealed);
    assert_eq!(session.step(), Step::Result);

    let result = session.result().unwrap();
    let team = present(&result.team_label);
    assert_eq!(team.code, "SSG");
    assert_eq!(team.rank, RankTag::Rank(6));
    assert_eq!(format_team_name(&result.team_label), "SSG 랜더스");

    let bodies = seen.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["startYear"], 2020);
    let prefs = bodies[0]["preferences"].as_object().unwrap();
    assert_eq!(prefs.len(), 6);
    assert!(prefs.values().all(|v| v == 3));
}

#[tokio::test]
async fn scenario_b_legend_team() {
    let (endpoint, _) = spawn_matcher(|| {
        (
            StatusCode::OK,
            json!({ "teamName": "현대", "reason": "왕조 시절을 기억하시는군요.", "year": "2004" })
                .to_string(),
        )
    })
    .await;

    let mut session = Session::new(Catalog::standard(), 2024).unwrap();
    session.set_year(1998).unwrap();
    session.start().unwrap();
    let ticket = answer_everything(&mut session, 5);

    let settlement = resolve(&service(&endpoint), ticket, PACING).await;
    assert_eq!(session.settle(settlement), Completion::Revealed);

    let result = session.result().unwrap();
    assert_eq!(result.year.as_deref(), Some("2004"));

    let team = present(&result.team_label);
    assert_eq!(team.rank, RankTag::Legend);
    assert_eq!(team.full_name, "현대 유니콘스");
    assert!(team.ticket_url.is_none());
}

#[tokio::test]
async fn scenario_c_service_error_resets_once() {
    let (endpoint, seen) =
        spawn_matcher(|| (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string())).await;

    let mut session = Session::new(Catalog::standard(), 2024).unwrap();
    session.set_year(2010).unwrap();
    session.start().unwrap();
    let ticket = answer_everything(&mut session, 2);

    let settlement = resolve(&service(&endpoint), ticket, PACING).await;
    assert!(matches!(&settlement.outcome, Err(SubmissionError::Status(s)) if s.as_u16() == 500));

    assert!(matches!(session.settle(settlement), Completion::Failed(_)));

    assert_eq!(session.step(), Step::Intro);
    assert!(session.answers().is_empty());
    assert!(session.result().is_none());
    assert_eq!(session.starting_year(), 2024);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_body_is_a_submission_error() {
    let (endpoint, _) = spawn_matcher(|| (StatusCode::OK, "<html>oops</html>".to_string())).await;

    let mut session = Session::new(Catalog::standard(), 2024).unwrap();
    session.start().unwrap();
    let ticket = answer_everything(&mut session, 4);

    let settlement = resolve(&service(&endpoint), ticket, PACING).await;
    assert!(matches!(settlement.outcome, Err(SubmissionError::Malformed(_))));
    assert!(matches!(session.settle(settlement), Completion::Failed(_)));
}

#[tokio::test]
async fn slow_service_times_out() {
    let router = Router::new().route(
        "/api/team-matching",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "teamName": "LG", "reason": "" }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = HttpMatchService::new(
        format!("http://{addr}/api/team-matching"),
        Duration::from_millis(100),
    )
    .unwrap();

    let mut session = Session::new(Catalog::standard(), 2024).unwrap();
    session.start().unwrap();
    let ticket = answer_everything(&mut session, 1);

    let settlement = resolve(&client, ticket, PACING).await;
    assert!(matches!(settlement.outcome, Err(SubmissionError::Transport(_))));
}

#[tokio::test]
async fn unreachable_service_is_a_submission_error() {
    // Grab a free port and release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut session = Session::new(Catalog::standard(), 2024).unwrap();
    session.start().unwrap();
    let ticket = answer_everything(&mut session, 3);

    let settlement = resolve(&service(&format!("http://{addr}/api/team-matching")), ticket, PACING).await;
    assert!(settlement.outcome.is_err());
    assert!(matches!(session.settle(settlement), Completion::Failed(_)));
    assert_eq!(session.step(), Step::Intro);
}

#[tokio::test]
async fn result_waits_for_minimum_delay() {
    let stub = CountingService {
        calls: AtomicUsize::new(0),
        team: "KIA",
    };

    let mut session = Session::new(Catalog::standard(), 2024).unwrap();
    session.start().unwrap();
    let ticket = answer_everything(&mut session, 3);

    let pacing = Duration::from_millis(150);
    let started = Instant::now();
    let settlement = resolve(&stub, ticket, pacing).await;
    assert!(started.elapsed() >= pacing);

    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.settle(settlement), Completion::Revealed);
}

#[tokio::test]
async fn abandoned_session_is_not_resurrected() {
    let stub = CountingService {
        calls: AtomicUsize::new(0),
        team: "두산",
    };

    let mut session = Session::new(Catalog::standard(), 2024).unwrap();
    session.start().unwrap();
    let ticket = answer_everything(&mut session, 3);

    // User walks away while the request is in flight
    session.reset();
    let settlement = resolve(&stub, ticket, PACING).await;

    assert_eq!(session.settle(settlement), Completion::Ignored);
    assert_eq!(session.step(), Step::Intro);
    assert!(session.result().is_none());
}

#[tokio::test]
async fn restart_after_result_submits_again() {
    let stub = CountingService {
        calls: AtomicUsize::new(0),
        team: "한화",
    };

    let mut session = Session::new(Catalog::standard(), 2024).unwrap();
    for round in 1..=2 {
        session.start().unwrap();
        let ticket = answer_everything(&mut session, 4);
        let settlement = resolve(&stub, ticket, PACING).await;
        assert_eq!(session.settle(settlement), Completion::Revealed);
        assert_eq!(stub.calls.load(Ordering::SeqCst), round);
        session.retry().unwrap();
    }
}
