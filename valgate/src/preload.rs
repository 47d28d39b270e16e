//! Préchargement des ressources : résolutions concurrentes, barrière de
//! conjonction

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::gate::GateEvent;
use crate::{Error, Result};

/// Capacité de résolution d'une ressource référencée.
///
/// Une résolution se termine exactement une fois, en succès ou en échec ;
/// le gate compte les deux de la même façon.
#[async_trait::async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, uri: &str) -> Result<()>;
}

/// Résolveur par défaut : HTTP pour les références `http(s)://`, sonde
/// du système de fichiers pour les autres.
///
/// Le corps des réponses HTTP est entièrement lu, comme le ferait un
/// cache de préchargement : c'est le téléchargement qui chauffe le cache
/// du collaborateur de stockage, pas le statut.
pub struct ProbeFetcher {
    client: reqwest::Client,
}

impl ProbeFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ProbeFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AssetFetcher for ProbeFetcher {
    async fn fetch(&self, uri: &str) -> Result<()> {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            let response = self
                .client
                .get(uri)
                .send()
                .await
                .map_err(|e| Error::FetchFailed(e.to_string()))?
                .error_for_status()
                .map_err(|e| Error::FetchFailed(e.to_string()))?;
            response
                .bytes()
                .await
                .map_err(|e| Error::FetchFailed(e.to_string()))?;
            Ok(())
        } else {
            let metadata = tokio::fs::metadata(uri)
                .await
                .map_err(|e| Error::FetchFailed(e.to_string()))?;
            if metadata.is_file() {
                Ok(())
            } else {
                Err(Error::FetchFailed(format!("{uri} is not a file")))
            }
        }
    }
}

/// Lance la résolution concurrente de tout le lot.
///
/// Toutes les résolutions partent ensemble, sans plafond ni ordre ;
/// chacune émet un [`GateEvent::AssetResolved`] vers la boucle
/// d'événements, qui tient le compte : c'est elle qui détecte la
/// conjonction "tout est résolu". Les résolutions en vol ne sont jamais
/// annulées : si l'utilisateur part, elles sont simplement abandonnées
/// avec le processus.
pub fn run_preload(
    fetcher: Arc<dyn AssetFetcher>,
    assets: Vec<String>,
    tx: mpsc::Sender<GateEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let total = assets.len();
        let tasks = assets.into_iter().map(|uri| {
            let fetcher = fetcher.clone();
            let tx = tx.clone();
            async move {
                let result = fetcher.fetch(&uri).await;
                if let Err(ref e) = result {
                    debug!(uri = %uri, error = %e, "Asset resolution failed");
                }
                let _ = tx
                    .send(GateEvent::AssetResolved {
                        uri,
                        ok: result.is_ok(),
                    })
                    .await;
            }
        });
        join_all(tasks).await;
        debug!(total, "Preload batch fully resolved");
    })
}
