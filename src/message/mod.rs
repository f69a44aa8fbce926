use crossterm::event::KeyEvent;

use crate::{directory::Podcast, feed::Episode};

/// Which screen is active. Exactly one at a time.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    #[default]
    Search,
    PodcastList,
    EpisodeList,
}

/// Generation number attached to every command, echoed back on its response.
pub type Ticket = u64;

/// Background work requested by the UI. Each request yields exactly one `Response`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    SearchPodcasts {
        ticket: Ticket,
        term: String,
        limit: u32,
    },
    FetchEpisodes {
        ticket: Ticket,
        url: String,
    },
}

impl Request {
    pub fn ticket(&self) -> Ticket {
        match self {
            Request::SearchPodcasts { ticket, .. } | Request::FetchEpisodes { ticket, .. } => {
                *ticket
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Podcasts(Vec<Podcast>),
    Episodes(Vec<Episode>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub ticket: Ticket,
    pub outcome: Outcome,
}

/// Everything the state machine consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Response(Response),
}

/// What the UI loop has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Dispatch(Request),
    Quit,
}
