//! Basic strategy and index play tests.

use bjtrain::strategy::{
    self, Direction, INDEX_PLAYS, Situation, basic_decision, chart, deviation, find_index_play,
    is_action_correct, recommend, recommend_with_count, should_take_insurance,
};
use bjtrain::{Action, Allowed, Card, Decision, Hand, Rank, Suit, recreate_hand};

const fn card(rank: Rank) -> Card {
    Card::new(rank, Suit::Hearts)
}

fn hand(ranks: &[Rank]) -> Hand {
    let cards: Vec<Card> = ranks.iter().copied().map(card).collect();
    recreate_hand(&cards, 10)
}

const NO_SPLIT: Allowed = Allowed {
    double: true,
    split: false,
    surrender: true,
};

const NOTHING: Allowed = Allowed {
    double: false,
    split: false,
    surrender: false,
};

#[test]
fn ten_pair_stands_against_six() {
    let tens = hand(&[Rank::Ten, Rank::Ten]);
    assert_eq!(recommend(&tens, &card(Rank::Six), Allowed::ALL), Action::Stand);
}

#[test]
fn eights_split_or_fall_back_to_hard_16() {
    let eights = hand(&[Rank::Eight, Rank::Eight]);
    let ten = card(Rank::Ten);

    assert_eq!(recommend(&eights, &ten, Allowed::ALL), Action::Split);
    assert_eq!(recommend(&eights, &ten, NO_SPLIT), Action::Surrender);
    assert_eq!(recommend(&eights, &ten, NOTHING), Action::Hit);
}

#[test]
fn aces_that_cannot_split_hit_soft_12() {
    let aces = hand(&[Rank::Ace, Rank::Ace]);
    let six = card(Rank::Six);

    assert_eq!(recommend(&aces, &six, Allowed::ALL), Action::Split);
    assert!(aces.is_soft());
    assert_eq!(aces.value(), 12);
    assert_eq!(recommend(&aces, &six, NO_SPLIT), Action::Hit);
}

#[test]
fn fives_double_like_hard_10() {
    let fives = hand(&[Rank::Five, Rank::Five]);
    assert_eq!(recommend(&fives, &card(Rank::Nine), Allowed::ALL), Action::Double);
    assert_eq!(recommend(&fives, &card(Rank::Ten), Allowed::ALL), Action::Hit);
}

#[test]
fn double_fallbacks() {
    let eleven = hand(&[Rank::Six, Rank::Five]);
    let ace = card(Rank::Ace);
    assert_eq!(basic_decision(&eleven, &ace, Allowed::ALL), Decision::Double);
    assert_eq!(recommend(&eleven, &ace, Allowed::ALL), Action::Double);
    assert_eq!(recommend(&eleven, &ace, NOTHING), Action::Hit);

    let soft_18 = hand(&[Rank::Ace, Rank::Seven]);
    let three = card(Rank::Three);
    assert_eq!(basic_decision(&soft_18, &three, Allowed::ALL), Decision::DoubleOrStand);
    assert_eq!(recommend(&soft_18, &three, Allowed::ALL), Action::Double);
    assert_eq!(recommend(&soft_18, &three, NOTHING), Action::Stand);
}

#[test]
fn surrender_fallbacks() {
    let sixteen = hand(&[Rank::Ten, Rank::Six]);
    let nine = card(Rank::Nine);
    assert_eq!(recommend(&sixteen, &nine, Allowed::ALL), Action::Surrender);
    assert_eq!(recommend(&sixteen, &nine, NOTHING), Action::Hit);

    let sevens = hand(&[Rank::Seven, Rank::Seven]);
    assert_eq!(recommend(&sevens, &card(Rank::Ten), Allowed::ALL), Action::Surrender);
    assert_eq!(recommend(&sevens, &card(Rank::Ace), Allowed::ALL), Action::Hit);
}

#[test]
fn multi_card_totals() {
    let hard_16 = hand(&[Rank::Seven, Rank::Four, Rank::Five]);
    assert_eq!(recommend(&hard_16, &card(Rank::Six), NOTHING), Action::Stand);
    assert_eq!(recommend(&hard_16, &card(Rank::Seven), NOTHING), Action::Hit);

    let soft_17 = hand(&[Rank::Ace, Rank::Two, Rank::Four]);
    assert!(soft_17.is_soft());
    assert_eq!(recommend(&soft_17, &card(Rank::Four), NOTHING), Action::Hit);
    assert_eq!(recommend(&soft_17, &card(Rank::Four), Allowed::ALL), Action::Double);

    let low = hand(&[Rank::Two, Rank::Two]);
    assert_eq!(recommend(&low, &card(Rank::Ten), NOTHING), Action::Hit);

    let busted = hand(&[Rank::Ten, Rank::Nine, Rank::Five]);
    assert_eq!(recommend(&busted, &card(Rank::Ten), NOTHING), Action::Stand);
}

#[test]
fn split_hands_skip_the_pair_chart() {
    let mut split = Hand::from_split(card(Rank::Eight), 10);
    split.add_card(card(Rank::Eight));
    assert!(split.is_pair());
    assert_eq!(recommend(&split, &card(Rank::Six), Allowed::ALL), Action::Stand);
}

#[test]
fn every_hand_gets_an_allowed_action() {
    let options = [
        Allowed::ALL,
        NO_SPLIT,
        NOTHING,
        Allowed {
            double: false,
            split: true,
            surrender: false,
        },
    ];
    for first in Rank::ALL {
        for second in Rank::ALL {
            let dealt = hand(&[first, second]);
            for up in Rank::ALL {
                let upcard = card(up);
                for allowed in options {
                    let action = recommend(&dealt, &upcard, allowed);
                    assert!(allowed.double || action != Action::Double);
                    assert!(allowed.split || action != Action::Split);
                    assert!(allowed.surrender || action != Action::Surrender);
                    assert!(is_action_correct(action, &dealt, &upcard, allowed));
                }
            }
        }
    }
}

#[test]
fn hit_is_correct_when_double_is_unavailable() {
    let eleven = hand(&[Rank::Seven, Rank::Four]);
    let six = card(Rank::Six);
    assert!(is_action_correct(Action::Hit, &eleven, &six, NOTHING));
    assert!(!is_action_correct(Action::Stand, &eleven, &six, NOTHING));
    assert!(!is_action_correct(Action::Hit, &eleven, &six, Allowed::ALL));
}

#[test]
fn chart_lookups_are_bounded() {
    assert_eq!(chart::hard(4, 6), None);
    assert_eq!(chart::hard(12, 4), Some(Decision::Stand));
    assert_eq!(chart::hard(12, 1), None);
    assert_eq!(chart::soft(12, 5), None);
    assert_eq!(chart::soft(19, 6), Some(Decision::DoubleOrStand));
    assert_eq!(chart::pair(11, 11), Some(Decision::Split));
    assert_eq!(chart::pair(9, 7), Some(Decision::Stand));
    assert_eq!(Decision::SurrenderOrHit.code(), "Rh");
}

#[test]
fn allowed_reflects_rules_and_bankroll() {
    let eights = hand(&[Rank::Eight, Rank::Eight]);
    let full_play = Allowed::for_hand(&eights, &bjtrain::GameOptions::full_play());
    assert!(full_play.double && !full_play.split && full_play.surrender);

    let classic = Allowed::for_hand(&eights, &bjtrain::GameOptions::classic());
    assert!(classic.split);

    let broke = classic.with_bankroll(5, 10);
    assert!(!broke.double && !broke.split && broke.surrender);
}

#[test]
fn index_table_covers_illustrious_18_and_fab_4() {
    assert_eq!(INDEX_PLAYS.len(), 22);
    assert_eq!(INDEX_PLAYS[0].situation, Situation::Insurance);
    assert!(
        INDEX_PLAYS
            .iter()
            .filter(|play| play.deviation == Decision::SurrenderOrHit)
            .all(|play| play.direction == Direction::AtOrAbove)
    );
}

#[test]
fn sixteen_vs_ten_stands_at_zero() {
    let sixteen = hand(&[Rank::Ten, Rank::Six]);
    let ten = card(Rank::Queen);

    let play = find_index_play(&sixteen, &ten).unwrap();
    assert_eq!(play.name, "16 vs 10 Stand");
    assert_eq!(deviation(&sixteen, &ten, 0), Some(Decision::Stand));
    assert_eq!(deviation(&sixteen, &ten, -1), None);

    assert_eq!(recommend_with_count(&sixteen, &ten, NOTHING, 0), Action::Stand);
    assert_eq!(recommend_with_count(&sixteen, &ten, NOTHING, -1), Action::Hit);
    assert_eq!(recommend_with_count(&sixteen, &ten, Allowed::ALL, -1), Action::Surrender);
}

#[test]
fn low_count_plays_trigger_at_or_below() {
    let twelve = hand(&[Rank::Ten, Rank::Two]);
    let four = card(Rank::Four);
    assert_eq!(recommend_with_count(&twelve, &four, NOTHING, 1), Action::Stand);
    assert_eq!(recommend_with_count(&twelve, &four, NOTHING, 0), Action::Hit);
}

#[test]
fn ten_pair_split_needs_split_allowed() {
    let tens = hand(&[Rank::King, Rank::King]);
    let six = card(Rank::Six);
    assert_eq!(recommend_with_count(&tens, &six, Allowed::ALL, 4), Action::Split);
    assert_eq!(recommend_with_count(&tens, &six, NO_SPLIT, 4), Action::Stand);
    assert_eq!(recommend_with_count(&tens, &six, Allowed::ALL, 3), Action::Stand);
}

#[test]
fn insurance_is_not_a_playing_deviation() {
    let sixteen = hand(&[Rank::Ten, Rank::Six]);
    assert!(find_index_play(&sixteen, &card(Rank::Ace)).is_none());
    assert!(should_take_insurance(3));
    assert!(!should_take_insurance(2));

    // Soft hands have no index plays.
    let soft = hand(&[Rank::Ace, Rank::Five]);
    assert!(find_index_play(&soft, &card(Rank::Ten)).is_none());
}

#[test]
fn upcard_values() {
    assert_eq!(strategy::upcard_value(&card(Rank::Ace)), 11);
    assert_eq!(strategy::upcard_value(&card(Rank::Jack)), 10);
    assert_eq!(strategy::upcard_value(&card(Rank::Two)), 2);
}
