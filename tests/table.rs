//! Multiplayer table tests.

use bjtrain::table::MAX_SEATS;
use bjtrain::{
    Action, ActionError, BetError, Card, DealError, Event, EventQueue, GameOptions, HandOutcome,
    Host, HostError, Phase, PlayerAction, PlayerId, Rank, Replica, Suit, TableState,
};

const fn card(rank: Rank) -> Card {
    Card::new(rank, Suit::Diamonds)
}

fn cards(ranks: &[Rank]) -> Vec<Card> {
    ranks.iter().copied().map(card).collect()
}

fn id(name: &str) -> PlayerId {
    PlayerId::from(name)
}

/// A two-seat table whose next deal gives alice 10,7 and bob 9,8 against
/// a dealer 5,6; then 2, 5, 10 and low cards.
fn preloaded_table() -> TableState {
    let mut state = TableState::new();
    state.seat(id("alice"), 1000).unwrap();
    state.seat(id("bob"), 1000).unwrap();
    let mut draws = cards(&[
        Rank::Ten,
        Rank::Nine,
        Rank::Five,
        Rank::Seven,
        Rank::Eight,
        Rank::Six,
        Rank::Two,
        Rank::Five,
        Rank::Ten,
    ]);
    draws.extend(cards(&[Rank::Two; 11]));
    state.load_shoe(&draws);
    state
}

fn host_with(state: TableState, queue: &EventQueue) -> Host<&EventQueue> {
    Host::from_snapshot(id("alice"), GameOptions::multiplayer(), state, 1, queue)
}

#[test]
fn host_deals_once_every_seat_has_bet() {
    let queue = EventQueue::new();
    let host = host_with(preloaded_table(), &queue);

    host.handle(&id("alice"), PlayerAction::Bet { amount: 50 }).unwrap();
    let state = host.snapshot();
    assert_eq!(state.phase, Phase::Betting);
    assert_eq!(state.bet(&id("alice")), Some(50));
    assert_eq!(state.bankroll(&id("alice")), Some(950));
    assert!(state.player_hands(&id("alice")).is_none());

    host.handle(&id("bob"), PlayerAction::Bet { amount: 100 }).unwrap();
    let state = host.snapshot();
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.current_player_id, Some(id("alice")));
    assert_eq!(state.hand_index(&id("alice")), Some(0));
    assert_eq!(state.current_turn(), Some((&id("alice"), 0)));
    assert_eq!(state.player_hands(&id("alice")).unwrap()[0].value(), 17);
    assert_eq!(state.player_hands(&id("bob")).unwrap()[0].value(), 17);
    assert_eq!(state.player_hands(&id("bob")).unwrap()[0].bet(), 100);
    assert_eq!(state.dealer_hand.visible_value(), 5);
    assert!(!state.dealer_hand.is_hole_revealed());
    assert_eq!(state.cards_dealt, 6);

    assert_eq!(queue.len(), 2);
}

#[test]
fn full_round_settles_every_seat() {
    let queue = EventQueue::new();
    let host = host_with(preloaded_table(), &queue);
    host.handle(&id("alice"), PlayerAction::Bet { amount: 50 }).unwrap();
    host.handle(&id("bob"), PlayerAction::Bet { amount: 100 }).unwrap();

    host.handle(&id("alice"), PlayerAction::Stand).unwrap();
    assert_eq!(host.snapshot().current_player_id, Some(id("bob")));

    host.handle(&id("bob"), PlayerAction::Hit).unwrap();
    assert_eq!(host.snapshot().player_hands(&id("bob")).unwrap()[0].value(), 19);
    host.handle(&id("bob"), PlayerAction::Stand).unwrap();

    let state = host.snapshot();
    assert_eq!(state.phase, Phase::Results);
    assert_eq!(state.current_player_id, None);
    assert!(state.dealer_hand.is_hole_revealed());
    assert_eq!(state.dealer_hand.value(), 26);
    assert_eq!(state.bankroll(&id("alice")), Some(1050));
    assert_eq!(state.bankroll(&id("bob")), Some(1100));
    assert_eq!(
        state.player_hands(&id("bob")).unwrap()[0].result(),
        Some(HandOutcome::Win)
    );

    let results = state.results(host.options());
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, id("alice"));
    assert_eq!(results[0].1.net, 50);
    assert_eq!(results[1].1.net, 100);
}

#[test]
fn out_of_turn_actions_are_dropped_silently() {
    let queue = EventQueue::new();
    let host = host_with(preloaded_table(), &queue);
    host.handle(&id("alice"), PlayerAction::Bet { amount: 50 }).unwrap();
    host.handle(&id("bob"), PlayerAction::Bet { amount: 100 }).unwrap();
    let before = host.snapshot();
    let published = queue.len();

    assert_eq!(
        host.handle(&id("bob"), PlayerAction::Hit).unwrap_err(),
        HostError::Action(ActionError::NotYourTurn)
    );
    assert_eq!(
        host.handle(&id("mallory"), PlayerAction::Stand).unwrap_err(),
        HostError::Action(ActionError::NotYourTurn)
    );
    assert_eq!(
        host.handle(&id("alice"), PlayerAction::Bet { amount: 10 }).unwrap_err(),
        HostError::Bet(BetError::InvalidState)
    );

    assert_eq!(host.snapshot(), before);
    assert_eq!(queue.len(), published);
}

#[test]
fn invalid_bets_are_rejected() {
    let queue = EventQueue::new();
    let host = host_with(preloaded_table(), &queue);

    assert_eq!(
        host.handle(&id("alice"), PlayerAction::Bet { amount: 0 }).unwrap_err(),
        HostError::Bet(BetError::ZeroBet)
    );
    assert_eq!(
        host.handle(&id("alice"), PlayerAction::Bet { amount: 5000 }).unwrap_err(),
        HostError::Bet(BetError::InsufficientFunds)
    );
    assert_eq!(
        host.handle(&id("carol"), PlayerAction::Bet { amount: 10 }).unwrap_err(),
        HostError::Bet(BetError::PlayerNotFound)
    );
    host.handle(&id("alice"), PlayerAction::Bet { amount: 10 }).unwrap();
    assert_eq!(
        host.handle(&id("alice"), PlayerAction::Bet { amount: 10 }).unwrap_err(),
        HostError::Bet(BetError::AlreadyBet)
    );
    assert_eq!(queue.len(), 1);
}

#[test]
fn only_the_host_starts_the_next_round() {
    let queue = EventQueue::new();
    let host = host_with(preloaded_table(), &queue);
    assert_eq!(host.next_round(&id("alice")).unwrap_err(), HostError::InvalidPhase);

    host.handle(&id("alice"), PlayerAction::Bet { amount: 50 }).unwrap();
    host.handle(&id("bob"), PlayerAction::Bet { amount: 100 }).unwrap();
    host.handle(&id("alice"), PlayerAction::Stand).unwrap();
    host.handle(&id("bob"), PlayerAction::Stand).unwrap();
    assert_eq!(host.snapshot().phase, Phase::Results);

    assert_eq!(host.next_round(&id("bob")).unwrap_err(), HostError::NotHost);
    host.next_round(&id("alice")).unwrap();

    let state = host.snapshot();
    assert_eq!(state.phase, Phase::Betting);
    assert_eq!(state.bet(&id("alice")), Some(0));
    assert_eq!(state.bet(&id("bob")), Some(0));
    assert!(state.hands.is_empty());
    assert!(state.dealer_hand.is_empty());
    assert_eq!(state.bankroll(&id("alice")), Some(950));
    assert_eq!(state.bankroll(&id("bob")), Some(900));
}

#[test]
fn split_continues_on_the_first_hand() {
    let options = GameOptions::multiplayer();
    let mut state = TableState::new();
    state.seat(id("alice"), 1000).unwrap();
    state.place_bet(&id("alice"), 100).unwrap();
    state
        .deal_from(
            &cards(&[
                Rank::Eight,
                Rank::Six,
                Rank::Eight,
                Rank::Ten,
                Rank::Three,
                Rank::Two,
                Rank::Ten,
                Rank::Two,
            ]),
            &options,
        )
        .unwrap();

    state.act(&id("alice"), Action::Split, &options).unwrap();
    let hands = state.player_hands(&id("alice")).unwrap();
    assert_eq!(hands.len(), 2);
    assert_eq!(hands[0].value(), 11);
    assert_eq!(hands[1].value(), 10);
    assert_eq!(hands[1].bet(), 100);
    assert_eq!(state.hand_index(&id("alice")), Some(0));
    assert_eq!(state.bankroll(&id("alice")), Some(800));

    state.act(&id("alice"), Action::Double, &options).unwrap();
    assert_eq!(state.hand_index(&id("alice")), Some(1));
    assert_eq!(state.phase, Phase::Playing);

    state.act(&id("alice"), Action::Stand, &options).unwrap();
    assert_eq!(state.phase, Phase::Results);
    assert_eq!(state.dealer_hand.value(), 18);
    assert_eq!(state.bankroll(&id("alice")), Some(1100));
}

#[test]
fn split_without_bankroll_changes_nothing() {
    let options = GameOptions::multiplayer();
    let mut state = TableState::new();
    state.seat(id("alice"), 100).unwrap();
    state.place_bet(&id("alice"), 100).unwrap();
    state
        .deal_from(
            &cards(&[Rank::Nine, Rank::Six, Rank::Nine, Rank::Ten, Rank::Two]),
            &options,
        )
        .unwrap();
    let before = state.clone();

    assert_eq!(
        state.act(&id("alice"), Action::Split, &options).unwrap_err(),
        ActionError::InsufficientFunds
    );
    assert_eq!(
        state.act(&id("alice"), Action::Double, &options).unwrap_err(),
        ActionError::InsufficientFunds
    );
    assert_eq!(state, before);
}

#[test]
fn split_hands_never_split_again() {
    let options = GameOptions::multiplayer();
    let mut state = TableState::new();
    state.seat(id("alice"), 1000).unwrap();
    state.place_bet(&id("alice"), 100).unwrap();
    state
        .deal_from(
            &cards(&[
                Rank::Eight,
                Rank::Six,
                Rank::Eight,
                Rank::Ten,
                Rank::Eight,
                Rank::Eight,
                Rank::Two,
            ]),
            &options,
        )
        .unwrap();

    state.act(&id("alice"), Action::Split, &options).unwrap();
    let hands = state.player_hands(&id("alice")).unwrap();
    assert!(hands.iter().all(|hand| hand.is_pair()));

    assert_eq!(
        state.act(&id("alice"), Action::Split, &options).unwrap_err(),
        ActionError::CannotSplit
    );
    state.act(&id("alice"), Action::Stand, &options).unwrap();
    assert_eq!(state.hand_index(&id("alice")), Some(1));
    assert_eq!(
        state.act(&id("alice"), Action::Split, &options).unwrap_err(),
        ActionError::CannotSplit
    );
    assert_eq!(state.player_hands(&id("alice")).unwrap().len(), 2);
    assert_eq!(state.bankroll(&id("alice")), Some(800));

    state.act(&id("alice"), Action::Stand, &options).unwrap();
    assert_eq!(state.phase, Phase::Results);
    assert_eq!(state.dealer_hand.value(), 18);
}

#[test]
fn surrender_records_its_result_at_once() {
    let options = GameOptions::multiplayer();
    let mut state = TableState::new();
    state.seat(id("alice"), 1000).unwrap();
    state.seat(id("bob"), 1000).unwrap();
    state.place_bet(&id("alice"), 100).unwrap();
    state.place_bet(&id("bob"), 100).unwrap();
    state
        .deal_from(
            &cards(&[
                Rank::Ten,
                Rank::Ten,
                Rank::Ten,
                Rank::Six,
                Rank::Nine,
                Rank::Seven,
            ]),
            &options,
        )
        .unwrap();

    state.act(&id("alice"), Action::Surrender, &options).unwrap();
    assert_eq!(
        state.player_hands(&id("alice")).unwrap()[0].result(),
        Some(HandOutcome::Surrendered)
    );
    assert_eq!(state.current_player_id, Some(id("bob")));

    state.act(&id("bob"), Action::Stand, &options).unwrap();
    assert_eq!(state.phase, Phase::Results);
    assert_eq!(state.bankroll(&id("alice")), Some(950));
    assert_eq!(state.bankroll(&id("bob")), Some(1100));
}

#[test]
fn blackjacks_are_skipped_for_the_turn() {
    let options = GameOptions::multiplayer();
    let mut state = TableState::new();
    state.seat(id("alice"), 1000).unwrap();
    state.seat(id("bob"), 1000).unwrap();
    state.place_bet(&id("alice"), 100).unwrap();
    state.place_bet(&id("bob"), 100).unwrap();
    state
        .deal_from(
            &cards(&[
                Rank::Ace,
                Rank::Ten,
                Rank::Ten,
                Rank::King,
                Rank::Eight,
                Rank::Seven,
            ]),
            &options,
        )
        .unwrap();

    assert_eq!(state.current_player_id, Some(id("bob")));
    assert_eq!(
        state.act(&id("alice"), Action::Hit, &options).unwrap_err(),
        ActionError::NotYourTurn
    );
}

#[test]
fn dealer_plays_at_once_when_everyone_has_blackjack() {
    let options = GameOptions::multiplayer();
    let mut state = TableState::new();
    state.seat(id("alice"), 1000).unwrap();
    state.place_bet(&id("alice"), 100).unwrap();
    state
        .deal_from(&cards(&[Rank::Ace, Rank::Six, Rank::King, Rank::Five]), &options)
        .unwrap();

    assert_eq!(state.phase, Phase::Results);
    assert_eq!(state.dealer_hand.len(), 2);
    assert_eq!(state.bankroll(&id("alice")), Some(1150));
}

#[test]
fn deal_errors() {
    let options = GameOptions::multiplayer();
    let mut state = TableState::new();
    assert_eq!(state.deal(&options).unwrap_err(), DealError::BetsPending);

    state.seat(id("alice"), 1000).unwrap();
    state.seat(id("bob"), 1000).unwrap();
    state.place_bet(&id("alice"), 10).unwrap();
    assert_eq!(state.deal(&options).unwrap_err(), DealError::BetsPending);

    state.place_bet(&id("bob"), 10).unwrap();
    state.load_shoe(&cards(&[Rank::Two; 5]));
    assert_eq!(state.deal(&options).unwrap_err(), DealError::NotEnoughCards);
    assert_eq!(state.phase, Phase::Betting);
}

#[test]
fn seating_limits() {
    let mut state = TableState::new();
    for seat in 0..MAX_SEATS {
        state.seat(PlayerId::new(format!("p{seat}")), 100).unwrap();
    }
    assert_eq!(state.seat(id("late"), 100).unwrap_err(), HostError::TableFull);
    assert_eq!(state.seat(id("p0"), 100).unwrap_err(), HostError::AlreadySeated);
}

#[test]
fn leaving_on_turn_passes_it_on() {
    let queue = EventQueue::new();
    let host = host_with(preloaded_table(), &queue);
    host.handle(&id("alice"), PlayerAction::Bet { amount: 50 }).unwrap();
    host.handle(&id("bob"), PlayerAction::Bet { amount: 100 }).unwrap();

    assert!(host.leave(&id("alice")));
    let state = host.snapshot();
    assert_eq!(state.seats, vec![id("bob")]);
    assert_eq!(state.current_player_id, Some(id("bob")));
    assert!(state.player_hands(&id("alice")).is_none());
    assert!(!host.leave(&id("alice")));
}

#[test]
fn leaving_during_betting_can_complete_the_table() {
    let queue = EventQueue::new();
    let host = host_with(preloaded_table(), &queue);
    host.seat(id("carol")).unwrap();
    assert_eq!(host.snapshot().bankroll(&id("carol")), Some(1000));

    host.handle(&id("alice"), PlayerAction::Bet { amount: 50 }).unwrap();
    host.handle(&id("bob"), PlayerAction::Bet { amount: 100 }).unwrap();
    assert_eq!(host.snapshot().phase, Phase::Betting);

    host.leave(&id("carol"));
    assert_eq!(host.snapshot().phase, Phase::Playing);
}

#[test]
fn new_host_seats_itself_and_uses_a_fresh_shoe() {
    let queue = EventQueue::new();
    let host = Host::new(id("alice"), GameOptions::multiplayer(), 8, &queue);
    assert_eq!(host.snapshot().seats, vec![id("alice")]);
    assert!(host.snapshot().shoe.is_empty());

    host.handle(&id("alice"), PlayerAction::Bet { amount: 10 }).unwrap();
    let state = host.snapshot();
    assert_ne!(state.phase, Phase::Betting);
    assert_eq!(state.shoe.len() + state.cards_dealt, 52);
}

fn table_cards(state: &TableState) -> Vec<Card> {
    state
        .hands
        .values()
        .flatten()
        .flat_map(|hand| hand.cards().iter().copied())
        .chain(state.dealer_hand.cards().iter().copied())
        .collect()
}

/// Table cards plus the stack, sorted, with duplicates removed.
fn distinct_cards(state: &TableState) -> Vec<Card> {
    let mut all = table_cards(state);
    all.extend(state.shoe.iter().copied());
    all.sort_by_key(|card| (card.suit, card.rank));
    all.dedup();
    all
}

#[test]
fn every_round_starts_from_a_fresh_shoe() {
    let queue = EventQueue::new();
    let host = Host::new(id("alice"), GameOptions::multiplayer(), 3, &queue);

    for _ in 0..3 {
        host.handle(&id("alice"), PlayerAction::Bet { amount: 10 }).unwrap();
        let state = host.snapshot();
        assert_eq!(state.cards_dealt, 4);
        assert_eq!(state.shoe.len(), 48);

        while host.snapshot().phase == Phase::Playing {
            host.handle(&id("alice"), PlayerAction::Stand).unwrap();
        }
        let state = host.snapshot();
        assert_eq!(state.phase, Phase::Results);
        assert_eq!(state.cards_dealt, table_cards(&state).len());
        assert_eq!(state.shoe.len() + state.cards_dealt, 52);
        host.next_round(&id("alice")).unwrap();
    }
}

#[test]
fn dealer_running_dry_is_restocked_without_table_cards() {
    let queue = EventQueue::new();
    let mut state = TableState::new();
    state.seat(id("alice"), 1000).unwrap();
    state.load_shoe(&[
        Card::new(Rank::Two, Suit::Spades),
        Card::new(Rank::Two, Suit::Hearts),
        Card::new(Rank::Three, Suit::Spades),
        Card::new(Rank::Two, Suit::Clubs),
        Card::new(Rank::Two, Suit::Diamonds),
        Card::new(Rank::Three, Suit::Diamonds),
    ]);
    let host = host_with(state, &queue);
    host.handle(&id("alice"), PlayerAction::Bet { amount: 10 }).unwrap();
    assert_eq!(host.snapshot().shoe.len(), 2);

    // Dealer at 4 draws both remaining cards and still needs more.
    host.handle(&id("alice"), PlayerAction::Stand).unwrap();
    let state = host.snapshot();
    assert_eq!(state.phase, Phase::Results);
    assert!(state.dealer_hand.value() >= 17);
    assert_eq!(state.cards_dealt, table_cards(&state).len());
    assert_eq!(state.shoe.len() + state.cards_dealt, 52);
    assert_eq!(distinct_cards(&state).len(), 52);
}

#[test]
fn hitting_on_an_empty_stack_restocks_it() {
    let queue = EventQueue::new();
    let mut state = TableState::new();
    state.seat(id("alice"), 1000).unwrap();
    state.load_shoe(&[
        Card::new(Rank::Two, Suit::Spades),
        Card::new(Rank::Two, Suit::Hearts),
        Card::new(Rank::Three, Suit::Spades),
        Card::new(Rank::Two, Suit::Clubs),
    ]);
    let host = host_with(state, &queue);
    host.handle(&id("alice"), PlayerAction::Bet { amount: 10 }).unwrap();
    let dealt = host.snapshot();
    assert!(dealt.shoe.is_empty());

    assert_eq!(
        host.handle(&id("alice"), PlayerAction::Split).unwrap_err(),
        HostError::Action(ActionError::CannotSplit)
    );
    assert_eq!(host.snapshot(), dealt);

    host.handle(&id("alice"), PlayerAction::Hit).unwrap();
    let state = host.snapshot();
    assert_eq!(state.player_hands(&id("alice")).unwrap()[0].cards().len(), 3);
    assert_eq!(state.cards_dealt, 5);
    assert_eq!(state.shoe.len(), 47);
    assert_eq!(distinct_cards(&state).len(), 52);
}

#[test]
fn replicas_follow_the_host() {
    let queue = EventQueue::new();
    let host = host_with(preloaded_table(), &queue);
    let mut alice = Replica::new(id("alice"));
    let mut bob = Replica::new(id("bob"));
    assert!(alice.state().is_none());
    assert!(alice.my_hands().is_empty());

    let relay = |event: Event, replicas: &mut [&mut Replica]| {
        if let Event::PlayerAction { .. } = event {
            host.receive(&event).unwrap();
        }
        for event in queue.drain() {
            for replica in replicas.iter_mut() {
                replica.receive(&event);
            }
        }
    };

    host.broadcast();
    relay(bob.propose(PlayerAction::Bet { amount: 100 }), &mut [&mut alice, &mut bob]);
    assert!(alice.needs_bet());
    assert!(!bob.needs_bet());

    relay(alice.propose(PlayerAction::Bet { amount: 50 }), &mut [&mut alice, &mut bob]);
    assert!(alice.is_my_turn());
    assert!(!bob.is_my_turn());
    assert_eq!(alice.my_hands().len(), 1);
    assert_eq!(bob.bankroll(), Some(900));

    relay(alice.propose(Action::Stand.into()), &mut [&mut alice, &mut bob]);
    assert!(bob.is_my_turn());
    assert_eq!(bob.state(), Some(&host.snapshot()));
    assert_eq!(alice.state(), bob.state());
}

#[test]
fn snapshot_wire_format() {
    let options = GameOptions::multiplayer();
    let mut state = preloaded_table();
    state.place_bet(&id("alice"), 50).unwrap();
    state.place_bet(&id("bob"), 100).unwrap();
    state.deal(&options).unwrap();

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["phase"], "playing");
    assert_eq!(json["currentPlayerId"], "alice");
    assert_eq!(json["currentHandIndex"]["alice"], 0);
    assert_eq!(json["bets"]["bob"], 100);
    assert_eq!(json["hands"]["bob"][0]["value"], 17);
    assert_eq!(json["dealerHand"]["showHoleCard"], false);
    assert_eq!(json["cardsDealt"], 6);

    let back: TableState = serde_json::from_value(json).unwrap();
    assert_eq!(back, state);

    // A host elected from the snapshot continues the round.
    let queue = EventQueue::new();
    let successor = Host::from_snapshot(id("bob"), options, back, 2, &queue);
    successor.handle(&id("alice"), PlayerAction::Stand).unwrap();
    assert_eq!(successor.snapshot().current_player_id, Some(id("bob")));
}

#[test]
fn event_wire_format() {
    let bet = Event::PlayerAction {
        player_id: id("bob"),
        action: PlayerAction::Bet { amount: 50 },
    };
    let json = serde_json::to_value(&bet).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "event": "player_action",
            "payload": {"playerId": "bob", "action": "bet", "amount": 50}
        })
    );
    assert_eq!(serde_json::from_value::<Event>(json).unwrap(), bet);

    let hit: Event = serde_json::from_value(serde_json::json!({
        "event": "player_action",
        "payload": {"playerId": "alice", "action": "hit"}
    }))
    .unwrap();
    assert_eq!(
        hit,
        Event::PlayerAction {
            player_id: id("alice"),
            action: PlayerAction::Hit,
        }
    );

    let snapshot = Event::GameState(TableState::new());
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["event"], "game_state");
    assert_eq!(json["payload"]["phase"], "betting");
}
