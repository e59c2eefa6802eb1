use super::errors::{FetchError, PageError};
use super::images::Image;

/// Where a cat page is in its fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Idle { image_url: String },
    /// The image is hidden until the request identified by `request` completes.
    Loading { previous_url: String, request: u64 },
}

/// Proof that a request was started. Hand it back to finish or abandon it.
#[derive(Debug, PartialEq, Eq)]
pub struct RequestTicket {
    sequence: u64,
}

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// State of one cat page: the image on screen, whether a new one is loading,
/// and the last error a user-triggered fetch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatPage {
    state: PageState,
    last_error: Option<String>,
    sequence: u64,
}

impl CatPage {
    pub fn new(initial: Image) -> Self {
        Self {
            state: PageState::Idle {
                image_url: initial.url,
            },
            last_error: None,
            sequence: 0,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PageState::Loading { .. })
    }

    /// The URL to render, or `None` while loading.
    pub fn image_url(&self) -> Option<&str> {
        match &self.state {
            PageState::Idle { image_url } => Some(image_url),
            PageState::Loading { .. } => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// `Idle -> Loading`. Fails if a request is already in flight.
    pub fn begin_request(&mut self) -> Result<RequestTicket, PageError> {
        let PageState::Idle { image_url } = &mut self.state else {
            return Err(PageError::AlreadyLoading);
        };

        let previous_url = std::mem::take(image_url);
        self.sequence += 1;
        self.state = PageState::Loading {
            previous_url,
            request: self.sequence,
        };

        Ok(RequestTicket {
            sequence: self.sequence,
        })
    }

    /// `Loading -> Idle` with the fetch outcome applied.
    ///
    /// On success the new URL replaces the old one and any previous error is
    /// cleared. On failure the previous URL comes back and the error is kept
    /// for display. Returns `false` if the ticket is not the in-flight request.
    pub fn complete_request(
        &mut self,
        ticket: RequestTicket,
        outcome: &Result<Image, FetchError>,
    ) -> bool {
        let Some(previous_url) = self.take_loading(&ticket) else {
            return false;
        };

        match outcome {
            Ok(image) => {
                self.state = PageState::Idle {
                    image_url: image.url.clone(),
                };
                self.last_error = None;
            }
            Err(err) => {
                self.state = PageState::Idle {
                    image_url: previous_url,
                };
                self.last_error = Some(err.to_string());
            }
        }

        true
    }

    /// `Loading -> Idle` with the previous URL and no error, for requests that
    /// never produced an outcome.
    pub fn abandon_request(&mut self, ticket: RequestTicket) -> bool {
        let Some(previous_url) = self.take_loading(&ticket) else {
            return false;
        };
        self.state = PageState::Idle {
            image_url: previous_url,
        };
        true
    }

    fn take_loading(&mut self, ticket: &RequestTicket) -> Option<String> {
        match &mut self.state {
            PageState::Loading {
                previous_url,
                request,
            } if *request == ticket.sequence => Some(std::mem::take(previous_url)),
            _ => None,
        }
    }
}
