use std::sync::mpsc::Sender;

use tokio::runtime::Handle;
use tracing::{error, info, instrument};

use crate::{
    directory::DirectoryClient,
    feed::FeedClient,
    message::{Outcome, Request, Response},
};

/// Runs requests on background tasks and posts each result back to the UI thread.
/// The tasks never see the `App`; they only produce a `Response`.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    runtime: Handle,
    responder: Sender<Response>,
    directory: DirectoryClient,
    feeds: FeedClient,
}

impl Dispatcher {
    pub fn new(runtime: Handle, responder: Sender<Response>) -> Self {
        let http = reqwest::Client::new();
        Self {
            runtime,
            responder,
            directory: DirectoryClient::new(http.clone()),
            feeds: FeedClient::new(http),
        }
    }

    pub fn dispatch(&self, request: Request) {
        info!("Request type: {:?}", request);
        let responder = self.responder.clone();
        let directory = self.directory.clone();
        let feeds = self.feeds.clone();
        self.runtime.spawn(async move {
            let response = handle_background_request(&directory, &feeds, request).await;
            if let Err(e) = responder.send(response) {
                error!("failed to send message: {:?}", e);
            }
        });
    }
}

#[instrument(skip(directory, feeds))]
pub async fn handle_background_request(
    directory: &DirectoryClient,
    feeds: &FeedClient,
    request: Request,
) -> Response {
    let ticket = request.ticket();
    let outcome = match request {
        Request::SearchPodcasts { term, limit, .. } => {
            info!("received search request");
            match directory.search(&term, Some(limit)).await {
                Ok(res) => Outcome::Podcasts(res.results),
                Err(e) => Outcome::Error(e.to_string()),
            }
        }
        Request::FetchEpisodes { url, .. } => {
            info!("received feed request");
            match feeds.get_feed(&url).await {
                Ok(feed) => Outcome::Episodes(feed.episodes),
                Err(e) => Outcome::Error(e.to_string()),
            }
        }
    };
    Response { ticket, outcome }
}
