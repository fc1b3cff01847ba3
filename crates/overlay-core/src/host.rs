//! Message shapes exchanged with the host game client.
//!
//! Inbound events arrive as `{ "action": <name>, ...fields }`. Outbound
//! commands are an action name plus a JSON payload, answered asynchronously
//! with a possibly empty JSON body.

use crate::catalog::Emote;
use crate::error::Result;
use crate::offset::Offset;
use crate::projection::ProjectionTick;
use fnv::FnvHashMap;
use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use std::cell::RefCell;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "action")]
pub enum HostEvent {
    /// Menu visibility, optionally switching the UI language.
    #[serde(rename = "setVisible", alias = "show")]
    SetVisible {
        status: bool,
        #[serde(default)]
        locale: Option<String>,
    },
    #[serde(rename = "loadEmotes")]
    LoadEmotes {
        #[serde(default, deserialize_with = "emote_list")]
        all: Vec<Emote>,
        #[serde(default, deserialize_with = "category_table")]
        categories: FnvHashMap<String, Vec<Emote>>,
    },
    #[serde(rename = "resetSettings")]
    ResetSettings,
    /// Positioning gizmo on/off.
    #[serde(rename = "showReactGizmo", alias = "showGizmo")]
    ShowGizmo { status: bool },
    #[serde(rename = "updateGizmoPosition", alias = "updateGizmoProjection")]
    GizmoProjection(ProjectionTick),
    #[serde(other)]
    Unknown,
}

/// Lua encoders write an empty table as either `[]` or `{}`, and a nil
/// field as `null`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LuaTable<L, M> {
    List(L),
    Map(M),
}

fn emote_list<'de, D>(d: D) -> std::result::Result<Vec<Emote>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LuaTable<Vec<Emote>, FnvHashMap<String, IgnoredAny>>>::deserialize(d)? {
        None => Ok(Vec::new()),
        Some(LuaTable::List(all)) => Ok(all),
        Some(LuaTable::Map(m)) if m.is_empty() => Ok(Vec::new()),
        Some(LuaTable::Map(_)) => Err(de::Error::custom("expected a list of emotes")),
    }
}

fn category_table<'de, D>(d: D) -> std::result::Result<FnvHashMap<String, Vec<Emote>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LuaTable<Vec<IgnoredAny>, FnvHashMap<String, Vec<Emote>>>>::deserialize(d)? {
        None => Ok(FnvHashMap::default()),
        Some(LuaTable::Map(categories)) => Ok(categories),
        Some(LuaTable::List(l)) if l.is_empty() => Ok(FnvHashMap::default()),
        Some(LuaTable::List(_)) => Err(de::Error::custom("expected a category table")),
    }
}

impl HostEvent {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HostCommand {
    UpdatePedPosition(Offset),
    SetCameraControl { status: bool },
    SavePositioning,
    CancelPositioning,
    Close,
    ResetSettings,
    GetKeybinds,
    BindEmote { key: u32, emote: String },
    DeleteEmoteBind { key: u32 },
    PlayEmote { name: String, category: String },
    PlayEmoteWithPositioning { name: String, category: String },
}

impl HostCommand {
    pub fn action(&self) -> &'static str {
        match self {
            HostCommand::UpdatePedPosition(_) => "updatePedPositionFromUI",
            HostCommand::SetCameraControl { .. } => "setCameraControl",
            HostCommand::SavePositioning => "savePositioning",
            HostCommand::CancelPositioning => "cancelPositioning",
            HostCommand::Close => "close",
            HostCommand::ResetSettings => "resetSettings",
            HostCommand::GetKeybinds => "getKeybinds",
            HostCommand::BindEmote { .. } => "bindEmote",
            HostCommand::DeleteEmoteBind { .. } => "deleteEmoteBind",
            HostCommand::PlayEmote { .. } => "playEmote",
            HostCommand::PlayEmoteWithPositioning { .. } => "playEmoteWithPositioning",
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            HostCommand::UpdatePedPosition(o) => json!({
                "x": o.x,
                "y": o.y,
                "z": o.z,
                "rotZ": o.rot_z,
            }),
            HostCommand::SetCameraControl { status } => json!({ "status": status }),
            HostCommand::BindEmote { key, emote } => json!({ "key": key, "emote": emote }),
            HostCommand::DeleteEmoteBind { key } => json!({ "key": key }),
            HostCommand::PlayEmote { name, category }
            | HostCommand::PlayEmoteWithPositioning { name, category } => {
                json!({ "name": name, "category": category })
            }
            HostCommand::SavePositioning
            | HostCommand::CancelPositioning
            | HostCommand::Close
            | HostCommand::ResetSettings
            | HostCommand::GetKeybinds => json!({}),
        }
    }
}

/// Decode a response body. An empty body is an empty-object success.
pub fn parse_response(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(json!({}));
    }
    Ok(serde_json::from_str(body)?)
}

/// Fire-and-forget outbound channel. Implementations never block and absorb
/// transport failures themselves.
pub trait HostBridge {
    fn send(&self, command: HostCommand);
}

/// Collects commands instead of delivering them.
#[derive(Debug, Default)]
pub struct RecordingHost {
    sent: RefCell<Vec<HostCommand>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<HostCommand> {
        self.sent.borrow().clone()
    }

    pub fn take(&self) -> Vec<HostCommand> {
        std::mem::take(&mut *self.sent.borrow_mut())
    }

    pub fn count(&self, action: &str) -> usize {
        self.sent
            .borrow()
            .iter()
            .filter(|c| c.action() == action)
            .count()
    }
}

impl HostBridge for RecordingHost {
    fn send(&self, command: HostCommand) {
        self.sent.borrow_mut().push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_empty_object() {
        assert_eq!(parse_response("").unwrap(), json!({}));
        assert_eq!(parse_response("  \n").unwrap(), json!({}));
        assert_eq!(parse_response("[1]").unwrap(), json!([1]));
        assert!(parse_response("{nope").is_err());
    }

    #[test]
    fn decodes_gizmo_events_under_both_names() {
        let a = HostEvent::parse(r#"{"action":"showReactGizmo","status":true}"#).unwrap();
        let b = HostEvent::parse(r#"{"action":"showGizmo","status":true}"#).unwrap();
        assert_eq!(a, HostEvent::ShowGizmo { status: true });
        assert_eq!(a, b);

        let p = HostEvent::parse(
            r#"{"action":"updateGizmoPosition","screenX":0.5,"screenY":0.25,"onScreen":true,"camDist":3.0}"#,
        )
        .unwrap();
        match p {
            HostEvent::GizmoProjection(tick) => {
                assert_eq!(tick.screen_x, Some(0.5));
                assert_eq!(tick.cam_dist, Some(3.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_action_is_tolerated() {
        let e = HostEvent::parse(r#"{"action":"somethingElse","foo":1}"#).unwrap();
        assert_eq!(e, HostEvent::Unknown);
    }

    #[test]
    fn position_payload_uses_wire_names() {
        let cmd = HostCommand::UpdatePedPosition(Offset::new(0.5, -0.5, 1.0, 30.0));
        assert_eq!(cmd.action(), "updatePedPositionFromUI");
        assert_eq!(cmd.payload()["rotZ"], 30.0);
        assert_eq!(HostCommand::SavePositioning.payload(), json!({}));
    }
}
