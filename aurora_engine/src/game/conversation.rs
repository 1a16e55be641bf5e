use aurora_script::ObjectHandle;

/// A dialog running between an owner object and a player character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub dialog: String,
    pub owner: ObjectHandle,
    pub pc: ObjectHandle,
}

#[derive(Debug, Default)]
pub(crate) struct ConversationRuntime {
    active: Option<Conversation>,
    one_liners: usize,
}

/// Couples conversation mutations with the engine event log.
pub(crate) struct ConversationRuntimeAdapter<'a> {
    runtime: &'a mut ConversationRuntime,
    events: &'a mut Vec<String>,
}

impl ConversationRuntime {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn active(&self) -> Option<&Conversation> {
        self.active.as_ref()
    }

    pub(crate) fn one_liner_count(&self) -> usize {
        self.one_liners
    }
}

impl<'a> ConversationRuntimeAdapter<'a> {
    pub(crate) fn new(runtime: &'a mut ConversationRuntime, events: &'a mut Vec<String>) -> Self {
        Self { runtime, events }
    }

    /// Starts `dialog`; refused while another conversation is running.
    pub(crate) fn begin(
        &mut self,
        dialog: &str,
        owner: (ObjectHandle, &str),
        pc: (ObjectHandle, &str),
    ) -> bool {
        if let Some(active) = self.runtime.active.as_ref() {
            self.events.push(format!(
                "conversation.busy {} (requested {dialog})",
                active.dialog
            ));
            return false;
        }
        self.runtime.active = Some(Conversation {
            dialog: dialog.to_string(),
            owner: owner.0,
            pc: pc.0,
        });
        self.events
            .push(format!("conversation.begin {dialog} {} -> {}", owner.1, pc.1));
        true
    }

    pub(crate) fn speak_one_liner(&mut self, dialog: &str, speaker: &str, token: Option<&str>) {
        self.runtime.one_liners += 1;
        let message = match token {
            Some(token) => format!("conversation.oneliner {dialog} {speaker} token={token}"),
            None => format!("conversation.oneliner {dialog} {speaker}"),
        };
        self.events.push(message);
    }

    /// Ends the running conversation if `handle` takes part in it.
    pub(crate) fn end_involving(&mut self, handle: ObjectHandle) {
        let involved = self
            .runtime
            .active
            .as_ref()
            .map(|active| active.owner == handle || active.pc == handle)
            .unwrap_or(false);
        if !involved {
            return;
        }
        if let Some(ended) = self.runtime.active.take() {
            self.events.push(format!("conversation.end {}", ended.dialog));
        }
    }
}
