//! Session Commands
//!
//! Opening a session, settings that take effect on the next one, and the
//! wallet connection.

use std::sync::Arc;

use tauri::{AppHandle, Emitter, State};

use crate::domain::{resolve_package_id, Network};
use crate::ledger::{KeystoreWallet, SuiRpcClient};
use crate::services::{PhaseObserver, PhaseReport, Session, SessionInfo};
use crate::AppState;

/// Event carrying every mutation phase change
pub const MUTATION_PHASE_EVENT: &str = "mutation-phase";

/// The session currently serving commands
#[derive(Clone)]
pub struct ActiveSession {
    pub session: Arc<Session>,
    pub rpc: Arc<SuiRpcClient>,
}

/// Forwards phase reports to the webview
pub struct TauriPhaseObserver {
    app: AppHandle,
}

impl PhaseObserver for TauriPhaseObserver {
    fn on_phase(&self, report: &PhaseReport) {
        if let Err(e) = self.app.emit(MUTATION_PHASE_EVENT, report) {
            log::error!("Failed to emit {}: {}", MUTATION_PHASE_EVENT, e);
        }
    }
}

/// Clone the active session out of the lock
pub(crate) async fn active(state: &AppState) -> Result<ActiveSession, String> {
    state
        .session
        .read()
        .await
        .clone()
        .ok_or_else(|| "Session not opened".to_string())
}

/// Open the keystore wallet and attach it to `session`.
///
/// Reads the keystore off the async runtime; callers must not hold the
/// session lock across this.
async fn connect(
    app: &AppHandle,
    state: &AppState,
    session: &Session,
    rpc: Arc<SuiRpcClient>,
) -> Result<Session, String> {
    let wallet = KeystoreWallet::open_in_background(
        state.config.keystore_path(),
        state.config.signer().map_err(|e| e.to_string())?,
        rpc,
        state.config.gas_budget,
    )
    .await
    .map_err(|e| e.to_string())?;
    let observer = Arc::new(TauriPhaseObserver { app: app.clone() });
    Ok(session.connected(Arc::new(wallet), observer))
}

/// Start a fresh session from the stored settings.
///
/// The UI calls this on every (re)load. A wallet that was connected stays
/// connected; any pending marker of the old session is discarded.
#[tauri::command]
pub async fn open_session(
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<SessionInfo, String> {
    let settings = state
        .settings
        .load_session_settings()
        .await
        .map_err(|e| e.to_string())?;
    let package =
        resolve_package_id(settings.package_override.as_deref()).map_err(|e| e.to_string())?;
    let rpc_url = state.config.rpc_url(settings.network);
    let rpc = Arc::new(
        SuiRpcClient::new(rpc_url.clone(), state.config.rpc_settings())
            .map_err(|e| e.to_string())?,
    );

    let was_connected = state
        .session
        .read()
        .await
        .as_ref()
        .is_some_and(|a| a.session.address().is_some());

    let mut session = Session::new(settings.network, rpc_url, package, rpc.clone());
    if was_connected {
        match connect(&app, &state, &session, rpc.clone()).await {
            Ok(connected) => session = connected,
            Err(e) => log::warn!("Could not reconnect wallet: {}", e),
        }
    }
    let active = ActiveSession {
        session: Arc::new(session),
        rpc,
    };

    let info = active.session.info();
    log::info!(
        "session opened on {} with package {} ({:?})",
        info.network.as_str(),
        info.package_id,
        info.package_source
    );
    *state.session.write().await = Some(active);
    Ok(info)
}

#[tauri::command]
pub async fn session_info(state: State<'_, AppState>) -> Result<SessionInfo, String> {
    Ok(active(&state).await?.session.info())
}

/// Persist a package override; takes effect on the next `open_session`
#[tauri::command]
pub async fn set_package_override(
    package_id: String,
    state: State<'_, AppState>,
) -> Result<(), String> {
    state
        .settings
        .set_package_override(&package_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn clear_package_override(state: State<'_, AppState>) -> Result<(), String> {
    state
        .settings
        .clear_package_override()
        .await
        .map_err(|e| e.to_string())
}

/// Persist the network; takes effect on the next `open_session`
#[tauri::command]
pub async fn set_network(network: Network, state: State<'_, AppState>) -> Result<(), String> {
    state.settings.set_network(network).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn connect_wallet(
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<SessionInfo, String> {
    let current = active(&state).await?;
    let session = connect(&app, &state, &current.session, current.rpc.clone()).await?;
    let info = session.info();
    *state.session.write().await = Some(ActiveSession {
        session: Arc::new(session),
        rpc: current.rpc,
    });
    Ok(info)
}

#[tauri::command]
pub async fn disconnect_wallet(state: State<'_, AppState>) -> Result<SessionInfo, String> {
    let mut guard = state.session.write().await;
    let current = guard.clone().ok_or_else(|| "Session not opened".to_string())?;

    let session = current.session.disconnected();
    let info = session.info();
    *guard = Some(ActiveSession {
        session: Arc::new(session),
        rpc: current.rpc,
    });
    log::info!("wallet disconnected");
    Ok(info)
}

/// Last lines written to the app log
#[tauri::command]
pub fn recent_logs() -> Vec<String> {
    rolling_logger::recent_lines()
}
