use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{aggregate_partners, most_effective_partner};
use crate::models::{PartnerRecord, PartnerTable};

#[derive(Debug, Serialize)]
pub struct PartnerTableResponse {
    pub players: PartnerTable,
}

/// The full (player, partner) statistics table over doubles matches.
pub async fn table(State(state): State<AppState>) -> Result<Json<PartnerTableResponse>, ApiError> {
    let matches = state.load_matches()?;
    Ok(Json(PartnerTableResponse {
        players: aggregate_partners(&matches),
    }))
}

#[derive(Debug, Serialize)]
pub struct BestPartner {
    pub partner: String,
    pub win_ratio: f64,
    pub record: PartnerRecord,
}

#[derive(Debug, Serialize)]
pub struct PlayerPartnersResponse {
    pub player: String,
    pub partners: BTreeMap<String, PartnerRecord>,
    pub best_partner: Option<BestPartner>,
}

/// One player's partner records and their most effective partner.
///
/// A player with no doubles history gets an empty table, not an error.
pub async fn for_player(
    State(state): State<AppState>,
    Path(player): Path<String>,
) -> Result<Json<PlayerPartnersResponse>, ApiError> {
    let matches = state.load_matches()?;
    let table = aggregate_partners(&matches);

    let best_partner = most_effective_partner(&table, &player).map(|(partner, rec)| BestPartner {
        partner: partner.to_string(),
        win_ratio: rec.win_ratio(),
        record: *rec,
    });
    let partners = table.get(&player).cloned().unwrap_or_default();

    Ok(Json(PlayerPartnersResponse {
        player,
        partners,
        best_partner,
    }))
}
