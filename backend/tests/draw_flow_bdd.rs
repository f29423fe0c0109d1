//! Behaviour tests for the draw and reveal flow.
//!
//! Scenarios run the real services and token codec behind the HTTP routes:
//! a draw issues one link per participant, each link opens to that giver's
//! receivers only, and failures surface with the documented status codes.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use backend::Trace;
use backend::domain::{DrawService, RevealService};
use backend::inbound::http::configure;
use backend::inbound::http::links::LinkBuilder;
use backend::inbound::http::state::HttpState;
use backend::outbound::reveal_token::XChaChaRevealCodec;
use pairing::AssignmentGenerator;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

struct Response {
    status: u16,
    body: Vec<u8>,
}

impl Response {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("JSON body")
    }

    fn html(&self) -> String {
        String::from_utf8(self.body.clone()).expect("UTF-8 body")
    }
}

struct DrawFlowWorld {
    state: HttpState,
    participants: RefCell<Vec<String>>,
    giftee_count: RefCell<usize>,
    exclusions: RefCell<Vec<(String, String)>>,
    last: RefCell<Option<Response>>,
    tokens: RefCell<Vec<String>>,
    reveals: RefCell<Vec<Value>>,
}

impl DrawFlowWorld {
    fn new() -> Self {
        let codec = Arc::new(XChaChaRevealCodec::new(&Key::generate()));
        let state = HttpState::new(
            Arc::new(DrawService::new(codec.clone(), AssignmentGenerator::new())),
            Arc::new(RevealService::new(codec)),
            LinkBuilder::default(),
        );
        Self {
            state,
            participants: RefCell::new(Vec::new()),
            giftee_count: RefCell::new(1),
            exclusions: RefCell::new(Vec::new()),
            last: RefCell::new(None),
            tokens: RefCell::new(Vec::new()),
            reveals: RefCell::new(Vec::new()),
        }
    }

    fn send(&self, request: TestRequest) -> Response {
        let state = web::Data::new(self.state.clone());
        actix_rt::System::new().block_on(async move {
            let app = test::init_service(
                App::new()
                    .app_data(state)
                    .wrap(Trace)
                    .configure(configure),
            )
            .await;
            let res = test::call_service(&app, request.to_request()).await;
            let status = res.status().as_u16();
            let body = test::read_body(res).await.to_vec();
            Response { status, body }
        })
    }

    fn record(&self, response: Response) {
        *self.last.borrow_mut() = Some(response);
    }

    fn with_last<T>(&self, f: impl FnOnce(&Response) -> T) -> T {
        f(self.last.borrow().as_ref().expect("a request was sent"))
    }
}

fn unquote(raw: &str) -> String {
    raw.trim_matches('"').to_owned()
}

#[fixture]
fn world() -> DrawFlowWorld {
    DrawFlowWorld::new()
}

#[given("the participants {names}")]
fn the_participants(world: &DrawFlowWorld, names: String) {
    *world.participants.borrow_mut() = unquote(&names)
        .split(',')
        .map(|name| name.trim().to_owned())
        .collect();
}

#[given("a group of {count} participants")]
fn a_group_of_participants(world: &DrawFlowWorld, count: usize) {
    *world.participants.borrow_mut() = (1..=count)
        .map(|position| format!("Guest {position}"))
        .collect();
}

#[given("each giver buys for {count} receivers")]
fn each_giver_buys_for(world: &DrawFlowWorld, count: usize) {
    *world.giftee_count.borrow_mut() = count;
}

#[given("{giver} must not give to {receiver}")]
fn must_not_give_to(world: &DrawFlowWorld, giver: String, receiver: String) {
    world
        .exclusions
        .borrow_mut()
        .push((unquote(&giver), unquote(&receiver)));
}

#[when("the draw is requested through the API")]
fn the_draw_is_requested(world: &DrawFlowWorld) {
    let exclusions: Vec<Value> = world
        .exclusions
        .borrow()
        .iter()
        .map(|(giver, receiver)| json!({ "giver": giver, "receiver": receiver }))
        .collect();
    let body = json!({
        "participants": *world.participants.borrow(),
        "gifteeCount": *world.giftee_count.borrow(),
        "exclusions": exclusions,
    });
    let response = world.send(
        TestRequest::post()
            .uri("/api/v1/draws")
            .insert_header(("host", "gifts.local"))
            .set_json(body),
    );
    if response.status == 200 {
        let tokens = response.json()["draws"]
            .as_array()
            .expect("draws array")
            .iter()
            .map(|entry| entry["token"].as_str().expect("token").to_owned())
            .collect();
        *world.tokens.borrow_mut() = tokens;
    }
    world.record(response);
}

#[when("every reveal link is opened")]
fn every_reveal_link_is_opened(world: &DrawFlowWorld) {
    let tokens = world.tokens.borrow().clone();
    let reveals = tokens
        .iter()
        .map(|token| {
            let response =
                world.send(TestRequest::get().uri(&format!("/api/v1/reveals/{token}")));
            assert_eq!(response.status, 200, "reveal should succeed");
            response.json()
        })
        .collect();
    *world.reveals.borrow_mut() = reveals;
}

#[when("a tampered reveal token is opened")]
fn a_tampered_reveal_token_is_opened(world: &DrawFlowWorld) {
    let token = world.tokens.borrow().first().cloned().expect("issued token");
    let tampered: String = token
        .char_indices()
        .map(|(index, ch)| match (index, ch) {
            (10, 'A') => 'B',
            (10, _) => 'A',
            (_, other) => other,
        })
        .collect();
    assert_ne!(tampered, token);
    let response = world.send(TestRequest::get().uri(&format!("/api/v1/reveals/{tampered}")));
    world.record(response);
}

#[when("the draw form is submitted")]
fn the_draw_form_is_submitted(world: &DrawFlowWorld) {
    let names = world.participants.borrow().join("\n");
    let response = world.send(
        TestRequest::post()
            .uri("/")
            .insert_header(("host", "gifts.local"))
            .set_form([
                ("names", names),
                ("n_giftees", world.giftee_count.borrow().to_string()),
                ("exclusions", String::new()),
            ]),
    );
    world.record(response);
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &DrawFlowWorld, status: u16) {
    world.with_last(|response| assert_eq!(response.status, status));
}

#[then("the error code is {code}")]
fn the_error_code_is(world: &DrawFlowWorld, code: String) {
    world.with_last(|response| {
        assert_eq!(response.json()["code"], unquote(&code).as_str());
    });
}

#[then("the error reason is {reason}")]
fn the_error_reason_is(world: &DrawFlowWorld, reason: String) {
    world.with_last(|response| {
        assert_eq!(response.json()["details"]["code"], unquote(&reason).as_str());
    });
}

#[then("every participant has a reveal link")]
fn every_participant_has_a_reveal_link(world: &DrawFlowWorld) {
    let participants = world.participants.borrow().clone();
    world.with_last(|response| {
        let body = response.json();
        let draws = body["draws"].as_array().expect("draws array");
        let givers: Vec<&str> = draws
            .iter()
            .map(|entry| entry["giver"].as_str().expect("giver"))
            .collect();
        assert_eq!(givers, participants);
        for entry in draws {
            let token = entry["token"].as_str().expect("token");
            assert_eq!(
                entry["link"],
                format!("http://gifts.local/reveal/{token}").as_str()
            );
        }
    });
}

#[then("each giver sees {count} distinct receivers other than themselves")]
fn each_giver_sees_distinct_receivers(world: &DrawFlowWorld, count: usize) {
    for reveal in world.reveals.borrow().iter() {
        let giver = reveal["giver"].as_str().expect("giver");
        let receivers: HashSet<&str> = reveal["receivers"]
            .as_array()
            .expect("receivers")
            .iter()
            .map(|receiver| receiver.as_str().expect("receiver name"))
            .collect();
        assert_eq!(receivers.len(), count);
        assert!(!receivers.contains(giver));
    }
}

#[then("every participant is drawn {count} times")]
fn every_participant_is_drawn(world: &DrawFlowWorld, count: usize) {
    let mut drawn: HashMap<String, usize> = HashMap::new();
    for reveal in world.reveals.borrow().iter() {
        for receiver in reveal["receivers"].as_array().expect("receivers") {
            *drawn
                .entry(receiver.as_str().expect("receiver name").to_owned())
                .or_default() += 1;
        }
    }
    for participant in world.participants.borrow().iter() {
        assert_eq!(drawn.get(participant).copied(), Some(count));
    }
}

#[then("{giver} sees only {receiver}")]
fn giver_sees_only(world: &DrawFlowWorld, giver: String, receiver: String) {
    let giver = unquote(&giver);
    let reveals = world.reveals.borrow();
    let reveal = reveals
        .iter()
        .find(|reveal| reveal["giver"] == giver.as_str())
        .expect("giver's reveal");
    assert_eq!(reveal["receivers"], json!([unquote(&receiver)]));
}

#[then("the page says {message}")]
fn the_page_says(world: &DrawFlowWorld, message: String) {
    world.with_last(|response| assert!(response.html().contains(&unquote(&message))));
}

#[then("the page lists {count} reveal links")]
fn the_page_lists_reveal_links(world: &DrawFlowWorld, count: usize) {
    world.with_last(|response| {
        let html = response.html();
        assert_eq!(html.matches("href=\"http://gifts.local/reveal/").count(), count);
    });
}

#[scenario(
    path = "tests/features/draw_flow.feature",
    name = "Every participant gets a link that reveals only their receivers"
)]
fn every_participant_gets_a_link(world: DrawFlowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/draw_flow.feature",
    name = "A directed exclusion is honoured"
)]
fn a_directed_exclusion_is_honoured(world: DrawFlowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/draw_flow.feature",
    name = "Impossible exclusions are reported as infeasible"
)]
fn impossible_exclusions_are_infeasible(world: DrawFlowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/draw_flow.feature",
    name = "Asking for too many receivers is rejected"
)]
fn too_many_receivers_are_rejected(world: DrawFlowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/draw_flow.feature",
    name = "An oversized draw is rejected before searching"
)]
fn an_oversized_draw_is_rejected(world: DrawFlowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/draw_flow.feature",
    name = "A tampered link is rejected"
)]
fn a_tampered_link_is_rejected(world: DrawFlowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/draw_flow.feature",
    name = "The form asks for names when none are given"
)]
fn the_form_asks_for_names(world: DrawFlowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/draw_flow.feature",
    name = "The form lists one link per participant"
)]
fn the_form_lists_one_link_per_participant(world: DrawFlowWorld) {
    drop(world);
}
