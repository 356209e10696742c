//! Orchestration asynchrone : session + passerelle IA
//!
//! La session porte l'état ; le shell ne fait qu'intercaler les appels
//! réseau entre les transitions. Abandonner une analyse revient à
//! abandonner (drop) le futur de [`Shell::scan_image`] : le créneau est
//! libéré au drop.

use tracing::{info, warn};

use diagelec_common::{
    AnalysisResult, ChatMessage, Error, ImagePayload, Result, Session, ViewState,
};

use crate::gateway::AiGateway;

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Créneau d'analyse occupé ; libéré au drop sauf s'il a été rendu
struct InFlight<'a> {
    session: &'a mut Session,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn acquire(session: &'a mut Session) -> Result<Self> {
        session.begin_analysis()?;
        Ok(Self { session, armed: true })
    }

    fn release(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Analyse abandonnée");
            self.session.abandon_analysis();
        }
    }
}

pub struct Shell<G: AiGateway> {
    gateway: G,
    session: Session,
}

impl<G: AiGateway> Shell<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            session: Session::new(now_ms()),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Analyse une photo et ajoute le rapport en tête de liste
    ///
    /// En cas d'échec aucun rapport n'est créé, la notice d'erreur de la
    /// session est posée et l'erreur d'origine est renvoyée.
    pub async fn scan_image(
        &mut self,
        image: ImagePayload,
        captured_at: Option<String>,
    ) -> Result<&AnalysisResult> {
        let slot = InFlight::acquire(&mut self.session)?;
        info!(mime = %image.mime_type, "Analyse lancée");

        let outcome = self.gateway.analyze_image(&image).await;
        if let Err(e) = &outcome {
            warn!(error = %e, "Analyse échouée");
        }
        slot.release();

        let result =
            self.session
                .complete_analysis(outcome, image.to_data_url(), captured_at, now_ms())?;
        info!(
            id = %result.id,
            compliant = result.compliant,
            anomalies = result.anomalies.len(),
            "Rapport ajouté"
        );
        Ok(result)
    }

    /// Envoie une question à l'assistant
    ///
    /// Un texte vide est refusé sans rien ajouter (`Error::EmptyMessage`).
    /// Une fois la question acceptée, la réponse (ou le message d'erreur de
    /// connexion) est toujours ajoutée.
    pub async fn send_chat(&mut self, input: &str) -> Result<&ChatMessage> {
        let pending = self.session.transcript_mut().begin_send(input, now_ms())?;

        let outcome = self.gateway.chat(&pending.message, &pending.history).await;
        if let Err(e) = &outcome {
            warn!(error = %e, "Assistant injoignable");
        }

        Ok(self.session.transcript_mut().finish_send(outcome, now_ms()))
    }

    /// Clôt un envoi abandonné par l'excuse habituelle
    pub fn abandon_chat(&mut self) {
        let transcript = self.session.transcript_mut();
        if transcript.is_pending() {
            warn!("Question abandonnée");
            transcript.finish_send(Err(Error::Transport("annulé".into())), now_ms());
        }
    }

    pub fn navigate(&mut self, view: ViewState) {
        self.session.navigate(view);
    }

    pub fn delete_report(&mut self, id: &str) -> bool {
        let deleted = self.session.delete_report(id);
        if deleted {
            info!(%id, "Rapport supprimé");
        }
        deleted
    }
}
