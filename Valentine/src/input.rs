//! Surface d'entrée utilisateur : actions discrètes lues sur stdin.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Actions discrètes de l'utilisateur, miroir des clics de la page.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// Bouton lecture/pause.
    Toggle,
    /// Morceau précédent.
    Prev,
    /// Morceau suivant.
    Next,
    /// Curseur de lecture relâché à un pourcentage `[0, 100]`.
    Seek(f64),
    /// Réponse "yes" à la question.
    Yes,
    /// Réponse "no" à la question.
    No,
    /// Bouton d'entrée de l'écran de chargement.
    Enter,
    /// Clic sur un point de navigation.
    Goto(String),
    /// Fin de session (pas d'équivalent page : fermer l'onglet).
    Quit,
}

/// Parse une ligne de commande console en action.
pub fn parse_action(line: &str) -> Option<UserAction> {
    let mut words = line.split_whitespace();
    let verb = words.next()?.to_lowercase();
    let arg = words.next();

    match (verb.as_str(), arg) {
        ("play" | "pause" | "p", _) => Some(UserAction::Toggle),
        ("prev", _) => Some(UserAction::Prev),
        ("next", _) => Some(UserAction::Next),
        ("seek", Some(pct)) => pct.parse::<f64>().ok().map(UserAction::Seek),
        ("yes", _) => Some(UserAction::Yes),
        ("no", _) => Some(UserAction::No),
        ("enter", _) => Some(UserAction::Enter),
        ("goto", Some(section)) => Some(UserAction::Goto(section.to_string())),
        ("quit" | "q", _) => Some(UserAction::Quit),
        _ => None,
    }
}

/// Affiche l'aide des commandes.
pub fn print_help() {
    info!("Commands: enter | play | prev | next | seek <0-100> | yes | no | goto <section> | quit");
}

/// Lit stdin ligne à ligne et pousse les actions vers la boucle
/// d'événements. La tâche se termine sur EOF ou si la boucle disparaît.
pub fn spawn_stdin_reader(tx: mpsc::Sender<UserAction>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match parse_action(&line) {
                Some(action) => {
                    if tx.send(action).await.is_err() {
                        break;
                    }
                }
                None => {
                    warn!(input = %line.trim(), "Unknown command");
                    print_help();
                }
            }
        }
    })
}
