//! Generic runtime for session coordination.
//!
//! The Runtime is the sole coordinator of I/O. Each iteration it waits on the
//! [`Driver`] for one ready source, feeds it to the [`Client`] and executes
//! the resulting actions to completion, including the synchronous reply read,
//! before waiting again.

use chatline_client::{Client, ClientAction, ClientEvent, SessionEnd};

use crate::{Driver, Input, RuntimeError};

/// Generic runtime that orchestrates a [`Client`] over a [`Driver`].
pub struct Runtime<D: Driver> {
    driver: D,
    client: Client,
}

impl<D: Driver> Runtime<D> {
    /// Create a runtime with an anonymous client.
    pub fn new(driver: D) -> Self {
        Self::with_client(driver, Client::new())
    }

    /// Create a runtime around an existing client.
    pub fn with_client(driver: D, client: Client) -> Self {
        Self { driver, client }
    }

    /// Client state machine.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Run the session until it ends.
    ///
    /// The driver is stopped before returning, on success and on every error
    /// path.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails or the client cannot continue.
    pub async fn run(mut self) -> Result<SessionEnd, RuntimeError<D::Error>> {
        let result = self.run_until_end().await;
        self.driver.stop().await;

        match &result {
            Ok(end) => tracing::info!(%end, "session ended"),
            Err(e) => tracing::error!(error = %e, "session aborted"),
        }

        result
    }

    async fn run_until_end(&mut self) -> Result<SessionEnd, RuntimeError<D::Error>> {
        loop {
            let input = self.driver.next_input().await.map_err(RuntimeError::Driver)?;

            let event = match input {
                Input::Line(line) => ClientEvent::LineEntered(line),
                Input::Undecodable { len } => ClientEvent::UndecodableLine { len },
                Input::Broadcast(payload) => ClientEvent::BroadcastReceived(payload),
                Input::LocalClosed => ClientEvent::InputClosed,
            };

            let actions = self.client.handle(event)?;
            if let Some(end) = self.process_actions(actions).await? {
                return Ok(end);
            }
        }
    }

    /// Execute actions in order.
    ///
    /// Returns the session end if an action terminated the session.
    async fn process_actions(
        &mut self,
        initial_actions: Vec<ClientAction>,
    ) -> Result<Option<SessionEnd>, RuntimeError<D::Error>> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    ClientAction::Transmit(line) => {
                        self.driver.send_line(line).await.map_err(RuntimeError::Driver)?;
                    },
                    ClientAction::AwaitReply => {
                        let reply = self.driver.recv_reply().await.map_err(RuntimeError::Driver)?;
                        let follow_up = self.client.handle(ClientEvent::ReplyReceived(reply))?;
                        pending_actions.extend(follow_up);
                    },
                    ClientAction::Display(text) => {
                        self.driver.display(&text).map_err(RuntimeError::Driver)?;
                    },
                    ClientAction::Reject(rejection) => {
                        self.driver.display(&rejection.to_string()).map_err(RuntimeError::Driver)?;
                    },
                    ClientAction::Terminate(end) => return Ok(Some(end)),
                }
            }
        }

        Ok(None)
    }
}
