//! WebSocket inbound adapter pushing leaderboard standings.
//!
//! Clients connect to `/ws/leaderboard` and receive a [`ServerMessage`]
//! frame immediately, then another after every published refresh.

pub mod messages;

use actix_web::{get, web, HttpRequest, HttpResponse};
use actix_ws::Message;
use tracing::debug;

use crate::domain::LeaderboardEntry;
use crate::inbound::http::state::HttpState;
use messages::ServerMessage;

async fn send_standings(
    session: &mut actix_ws::Session,
    entries: Vec<LeaderboardEntry>,
) -> Result<(), actix_ws::Closed> {
    let frame = ServerMessage::Standings { entries };
    match serde_json::to_string(&frame) {
        Ok(text) => session.text(text).await,
        Err(error) => {
            debug!(%error, "failed to encode standings frame");
            Ok(())
        }
    }
}

/// Live leaderboard feed.
#[get("/ws/leaderboard")]
pub async fn leaderboard_feed(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<HttpState>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, mut session, mut frames) = actix_ws::handle(&req, body)?;
    let mut standings = state.leaderboard.subscribe();

    actix_web::rt::spawn(async move {
        let current = standings.borrow_and_update().clone();
        if send_standings(&mut session, current).await.is_err() {
            return;
        }
        loop {
            tokio::select! {
                changed = standings.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let entries = standings.borrow_and_update().clone();
                    if send_standings(&mut session, entries).await.is_err() {
                        break;
                    }
                }
                frame = frames.recv() => {
                    match frame {
                        Some(Ok(Message::Ping(bytes))) => {
                            if session.pong(&bytes).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                        Some(Ok(_)) => {}
                    }
                }
            }
        }
        let _ = session.close(None).await;
    });

    Ok(response)
}
