//! Fil de discussion de l'assistant
//!
//! Un envoi se fait en deux temps : `begin_send` ajoute le tour utilisateur
//! et fournit l'historique à rejouer, `finish_send` ajoute exactement un tour
//! modèle (réponse, repli ou excuse). Le fil grandit donc de 2 par envoi.

use crate::error::{Error, Result};
use crate::prompts::{CHAT_ERROR_MESSAGE, CHAT_FALLBACK_REPLY, CHAT_WELCOME_MESSAGE};
use crate::types::{ChatMessage, ChatTurn, Role};

/// Envoi accepté, à transmettre à la passerelle
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSend {
    pub message: String,
    /// Historique antérieur au message
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    pending: bool,
    next_seq: u64,
}

impl Transcript {
    /// Fil initial avec le message d'accueil
    pub fn new(now_ms: i64) -> Self {
        Self {
            messages: vec![ChatMessage {
                id: "welcome".to_string(),
                role: Role::Model,
                text: CHAT_WELCOME_MESSAGE.to_string(),
                timestamp: now_ms,
            }],
            pending: false,
            next_seq: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Historique complet sous forme (rôle, texte)
    pub fn history(&self) -> Vec<ChatTurn> {
        self.messages.iter().map(ChatTurn::from).collect()
    }

    /// Ajoute le tour utilisateur et réserve le tour modèle
    pub fn begin_send(&mut self, input: &str, now_ms: i64) -> Result<PendingSend> {
        if input.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }
        if self.pending {
            return Err(Error::ChatInProgress);
        }

        let history = self.history();
        self.push(Role::User, input.to_string(), now_ms);
        self.pending = true;

        Ok(PendingSend {
            message: input.to_string(),
            history,
        })
    }

    /// Ajoute le tour modèle correspondant au dernier envoi
    pub fn finish_send(&mut self, outcome: Result<String>, now_ms: i64) -> &ChatMessage {
        let text = match outcome {
            Ok(reply) if reply.trim().is_empty() => CHAT_FALLBACK_REPLY.to_string(),
            Ok(reply) => reply,
            Err(_) => CHAT_ERROR_MESSAGE.to_string(),
        };
        self.pending = false;
        self.push(Role::Model, text, now_ms)
    }

    fn push(&mut self, role: Role, text: String, now_ms: i64) -> &ChatMessage {
        self.next_seq += 1;
        self.messages.push(ChatMessage {
            id: format!("{}-{}", now_ms, self.next_seq),
            role,
            text,
            timestamp: now_ms,
        });
        // non vide : on vient de pousser
        &self.messages[self.messages.len() - 1]
    }
}
