use bjtrain::{
    Action, Event, EventQueue, Game, GameOptions, GameState, Hand, HandStatus, Host, PlayerAction,
    PlayerId, Replica, TrainingOptions,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmTrainer {
    game: Game,
}

#[wasm_bindgen]
impl WasmTrainer {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Self {
        Self {
            game: Game::new(GameOptions::classic(), TrainingOptions::default(), seed as u64),
        }
    }

    pub fn reset(&mut self, seed: u32) {
        self.game = Game::new(GameOptions::classic(), TrainingOptions::default(), seed as u64);
    }

    pub fn add_chip(&mut self, amount: u32) -> Result<u32, JsValue> {
        self.game
            .add_chip(amount as usize)
            .map(|bet| bet as u32)
            .map_err(js_err)
    }

    pub fn clear_bet(&mut self) -> Result<(), JsValue> {
        self.game.clear_bet().map_err(js_err)
    }

    pub fn deal(&mut self) -> Result<(), JsValue> {
        self.game.deal().map_err(js_err)
    }

    /// Plays `action` ("hit", "stand", ...) and returns the graded feedback.
    pub fn act(&mut self, action: &str) -> Result<JsValue, JsValue> {
        let action = parse_action(action)?;
        let feedback = self.game.act(action).map_err(js_err)?;
        to_js_value(&feedback)
    }

    pub fn play_dealer(&mut self) -> Result<(), JsValue> {
        self.game.play_dealer().map(|_| ()).map_err(js_err)
    }

    pub fn next_hand(&mut self) -> Result<(), JsValue> {
        self.game.next_hand().map_err(js_err)
    }

    pub fn recommendation(&self) -> Option<String> {
        self.game.recommendation().map(|action| action.to_string())
    }

    pub fn should_quiz_count(&mut self) -> bool {
        self.game.should_quiz_count()
    }

    pub fn check_count(&mut self, answer: i32) -> Result<JsValue, JsValue> {
        let check = self.game.check_count(answer);
        to_js_value(&check)
    }

    pub fn reset_session(&mut self) {
        self.game.reset_session();
    }

    pub fn stats(&self) -> Result<JsValue, JsValue> {
        to_js_value(self.game.stats())
    }

    pub fn last_result(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.game.last_result())
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let allowed = self.game.allowed();
        let snapshot = Snapshot {
            state: state_to_str(self.game.state()),
            bankroll: self.game.bankroll() as u32,
            pending_bet: self.game.pending_bet() as u32,
            hands: self
                .game
                .hands()
                .iter()
                .enumerate()
                .map(|(index, hand)| JsHand::from_hand(index as u32, hand))
                .collect(),
            active_hand: self.game.active_hand_index() as u32,
            dealer: self.game.dealer(),
            running_count: self.game.running_count(),
            true_count: self.game.true_count(),
            cards_remaining: self.game.shoe().cards_remaining() as u32,
            can_double: allowed.is_some_and(|allowed| allowed.double),
            can_split: allowed.is_some_and(|allowed| allowed.split),
            can_surrender: allowed.is_some_and(|allowed| allowed.surrender),
        };
        to_js_value(&snapshot)
    }
}

/// Table host for the multiplayer mode.
///
/// Snapshots are queued; the page drains them with `take_events` and
/// sends each one on its realtime channel.
#[wasm_bindgen]
pub struct WasmHost {
    host: Host<EventQueue>,
}

#[wasm_bindgen]
impl WasmHost {
    #[wasm_bindgen(constructor)]
    pub fn new(id: String, seed: u32) -> Self {
        Self {
            host: Host::new(
                PlayerId::new(id),
                GameOptions::multiplayer(),
                seed as u64,
                EventQueue::new(),
            ),
        }
    }

    /// Takes over from the last broadcast `game_state` payload.
    pub fn from_snapshot(id: String, state: JsValue, seed: u32) -> Result<Self, JsValue> {
        let state = serde_wasm_bindgen::from_value(state).map_err(js_err)?;
        Ok(Self {
            host: Host::from_snapshot(
                PlayerId::new(id),
                GameOptions::multiplayer(),
                state,
                seed as u64,
                EventQueue::new(),
            ),
        })
    }

    pub fn seat(&self, player: String) -> Result<(), JsValue> {
        self.host.seat(PlayerId::new(player)).map_err(js_err)
    }

    pub fn leave(&self, player: String) -> bool {
        self.host.leave(&PlayerId::new(player))
    }

    /// Handles an event received on the channel.
    pub fn receive(&self, event: JsValue) -> Result<(), JsValue> {
        let event: Event = serde_wasm_bindgen::from_value(event).map_err(js_err)?;
        self.host.receive(&event).map_err(js_err)
    }

    /// Applies the host's own action.
    pub fn act(&self, action: &str, amount: Option<u32>) -> Result<(), JsValue> {
        let action = parse_player_action(action, amount)?;
        self.host.handle(self.host.id(), action).map_err(js_err)
    }

    pub fn next_round(&self) -> Result<(), JsValue> {
        self.host.next_round(self.host.id()).map_err(js_err)
    }

    pub fn broadcast(&self) {
        self.host.broadcast();
    }

    pub fn take_events(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.host.transport().drain())
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.host.snapshot())
    }
}

/// A follower's view of a multiplayer table.
#[wasm_bindgen]
pub struct WasmReplica {
    replica: Replica,
}

#[wasm_bindgen]
impl WasmReplica {
    #[wasm_bindgen(constructor)]
    pub fn new(id: String) -> Self {
        Self {
            replica: Replica::new(PlayerId::new(id)),
        }
    }

    /// Applies an event from the channel; returns whether the view changed.
    pub fn receive(&mut self, event: JsValue) -> Result<bool, JsValue> {
        let event: Event = serde_wasm_bindgen::from_value(event).map_err(js_err)?;
        Ok(self.replica.receive(&event))
    }

    /// Builds the `player_action` event to send to the host.
    pub fn propose(&self, action: &str, amount: Option<u32>) -> Result<JsValue, JsValue> {
        let action = parse_player_action(action, amount)?;
        to_js_value(&self.replica.propose(action))
    }

    pub fn is_my_turn(&self) -> bool {
        self.replica.is_my_turn()
    }

    pub fn needs_bet(&self) -> bool {
        self.replica.needs_bet()
    }

    pub fn bankroll(&self) -> Option<u32> {
        self.replica.bankroll().map(|bankroll| bankroll as u32)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.replica.state())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a> {
    state: &'static str,
    bankroll: u32,
    pending_bet: u32,
    hands: Vec<JsHand>,
    active_hand: u32,
    dealer: &'a bjtrain::DealerHand,
    running_count: i32,
    true_count: f64,
    cards_remaining: u32,
    can_double: bool,
    can_split: bool,
    can_surrender: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsHand<'a> {
    index: u32,
    #[serde(flatten)]
    hand: &'a Hand,
    status: &'static str,
}

impl<'a> JsHand<'a> {
    fn from_hand(index: u32, hand: &'a Hand) -> Self {
        Self {
            index,
            hand,
            status: hand_status_to_str(hand.status()),
        }
    }
}

fn parse_action(action: &str) -> Result<Action, JsValue> {
    match action {
        "hit" => Ok(Action::Hit),
        "stand" => Ok(Action::Stand),
        "double" => Ok(Action::Double),
        "split" => Ok(Action::Split),
        "surrender" => Ok(Action::Surrender),
        _ => Err(JsValue::from_str("unknown action")),
    }
}

fn parse_player_action(action: &str, amount: Option<u32>) -> Result<PlayerAction, JsValue> {
    if action == "bet" {
        let amount = amount.ok_or_else(|| JsValue::from_str("bet needs an amount"))?;
        return Ok(PlayerAction::Bet {
            amount: amount as usize,
        });
    }
    parse_action(action).map(PlayerAction::from)
}

fn state_to_str(state: GameState) -> &'static str {
    match state {
        GameState::Betting => "Betting",
        GameState::PlayerTurn => "PlayerTurn",
        GameState::DealerTurn => "DealerTurn",
        GameState::Settled => "Settled",
    }
}

fn hand_status_to_str(status: HandStatus) -> &'static str {
    match status {
        HandStatus::Active => "Active",
        HandStatus::Stand => "Stand",
        HandStatus::Bust => "Bust",
        HandStatus::Blackjack => "Blackjack",
        HandStatus::Doubled => "Doubled",
        HandStatus::Surrendered => "Surrendered",
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}
