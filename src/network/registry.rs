//! Command name to message constructor lookup

use super::error::ProtocolError;
use super::message::{pad_command, Message, MsgVersion, COMMAND_VERACK, COMMAND_VERSION};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Builds an empty message ready to be filled by `decode_payload`
pub type MessageConstructor = fn() -> Message;

static GLOBAL_REGISTRY: Lazy<MessageRegistry> = Lazy::new(MessageRegistry::with_defaults);

/// Maps command names to message constructors.
///
/// Read-only once built, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct MessageRegistry {
    constructors: HashMap<String, MessageConstructor>,
}

impl MessageRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry knowing `version` and `verack`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(COMMAND_VERSION, || Message::Version(MsgVersion::default()));
        registry.insert(COMMAND_VERACK, || Message::Verack);
        registry
    }

    /// Process-wide registry with the default message types
    pub fn global() -> &'static MessageRegistry {
        &GLOBAL_REGISTRY
    }

    /// Add the constructor for `command`.
    ///
    /// Entries are never replaced: a command that is already known is
    /// `DuplicateCommand`, and names that cannot travel in a header are
    /// rejected like they are on send.
    pub fn register(
        mut self,
        command: &str,
        constructor: MessageConstructor,
    ) -> Result<Self, ProtocolError> {
        pad_command(command)?;
        if self.contains(command) {
            log::warn!("Refusing to replace constructor for {}", command);
            return Err(ProtocolError::DuplicateCommand(command.to_string()));
        }
        self.insert(command, constructor);
        Ok(self)
    }

    fn insert(&mut self, command: &str, constructor: MessageConstructor) {
        self.constructors.insert(command.to_string(), constructor);
        log::debug!("Registered constructor for {}", command);
    }

    /// Fresh message for `command`, if known
    pub fn construct(&self, command: &str) -> Option<Message> {
        self.constructors.get(command).map(|constructor| constructor())
    }

    pub fn contains(&self, command: &str) -> bool {
        self.constructors.contains_key(command)
    }

    /// Registered commands, sorted
    pub fn commands(&self) -> Vec<&str> {
        let mut commands: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        commands.sort_unstable();
        commands
    }
}
