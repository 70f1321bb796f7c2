/*!
 * The routes module contains all the tide routes and the logic to fulfill the
 * responses for each route.
 */
use serde::Serialize;
use tide::security::CorsMiddleware;
use tide::{Body, Request, Response, Server, StatusCode};

use crate::AppState;

pub const GREETING: &str = "Hello, I am the API service";

/**
 * Wire up the middleware and every route onto a new tide server
 */
pub fn app(state: AppState) -> Server<AppState> {
    let mut app = tide::with_state(state);
    app.with(driftwood::ApacheCombinedLogger);
    app.with(CorsMiddleware::new());

    app.at("/health").get(health);
    app.at("/api").get(index);
    app.at("/api/vote").get(votes::list).post(votes::create);
    app
}

fn json<T: Serialize>(status: StatusCode, body: &T) -> tide::Result<Response> {
    Ok(Response::builder(status).body(Body::from_json(body)?).build())
}

/**
 *  GET /health
 */
pub async fn health(_req: Request<AppState>) -> tide::Result<Response> {
    Ok(Response::new(StatusCode::Ok))
}

/**
 *  GET /api
 */
pub async fn index(_req: Request<AppState>) -> Result<String, tide::Error> {
    Ok(GREETING.to_string())
}

pub mod votes {
    use log::*;
    use tide::{Request, Response, StatusCode};

    use super::json;
    use crate::api_models::{ErrorResponse, VoteForm, VoteReceipt};
    use crate::AppState;

    /**
     *  GET /api/vote
     */
    pub async fn list(req: Request<AppState>) -> tide::Result<Response> {
        match req.state().store.list_counts().await {
            Ok(tally) => json(StatusCode::Ok, &tally),
            Err(err) => {
                error!("Error fetching votes: {}", err);
                json(StatusCode::InternalServerError, &ErrorResponse::new(err))
            },
        }
    }

    /**
     *  POST /api/vote
     */
    pub async fn create(mut req: Request<AppState>) -> tide::Result<Response> {
        let form = match req.body_form::<Vec<(String, String)>>().await {
            Ok(pairs) => VoteForm::from_pairs(pairs),
            Err(err) => {
                debug!("Unparsable vote form: {}", err);
                VoteForm::default()
            },
        };

        let vote = match form.vote() {
            Some(vote) => vote,
            None => {
                return json(StatusCode::BadRequest, &ErrorResponse::new("Missing vote parameter"));
            },
        };

        match req.state().store.insert(vote).await {
            Ok(voter_id) => {
                info!("Received vote '{}' from voter '{}'", vote, voter_id);
                json(StatusCode::Ok, &VoteReceipt { voter_id, vote: vote.to_string() })
            },
            Err(err) => {
                error!("Error inserting vote: {}", err);
                json(StatusCode::InternalServerError, &ErrorResponse::new(err))
            },
        }
    }
}
