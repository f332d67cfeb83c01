// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::FutureExt;
use periodic_table::Element;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickError {
    #[error("the element picker was closed without a selection")]
    Dismissed,
    #[error("the element picker request was replaced by a newer one")]
    Superseded,
}

type PickResult = Result<Element, PickError>;

/// The single slot for an outstanding "pick an element from the table" request.
///
/// At most one request is pending. Opening a new one rejects the previous request
/// with [`PickError::Superseded`]; closing the picker rejects it with
/// [`PickError::Dismissed`].
#[derive(Debug, Default)]
pub struct ElementPicker {
    pending: Option<oneshot::Sender<PickResult>>,
    open: bool,
}

/// Resolves once the user picked an element or the request was rejected.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct PickRequest {
    receiver: oneshot::Receiver<PickResult>,
}

impl Future for PickRequest {
    type Output = PickResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // A dropped sender means the picker went away without answering
        self.receiver
            .poll_unpin(cx)
            .map(|result| result.unwrap_or(Err(PickError::Dismissed)))
    }
}

impl ElementPicker {
    /// Opens the picker and returns the request it will answer.
    pub fn request(&mut self) -> PickRequest {
        self.reject(PickError::Superseded);
        let (sender, receiver) = oneshot::channel();
        self.pending = Some(sender);
        self.open = true;
        PickRequest { receiver }
    }

    pub fn resolve(&mut self, element: Element) {
        match self.pending.take() {
            Some(sender) => {
                if sender.send(Ok(element)).is_err() {
                    log::debug!("Picked {} after the request was abandoned", element);
                }
            }
            None => log::debug!("Picked {} without a pending request", element),
        }
        self.open = false;
    }

    pub fn dismiss(&mut self) {
        self.reject(PickError::Dismissed);
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn reject(&mut self, error: PickError) {
        if let Some(sender) = self.pending.take() {
            log::debug!("Rejecting element picker request: {}", error);
            let _ = sender.send(Err(error));
        }
    }
}


// End of File
