use arena_engine::{
    experience_gain, simulate, Ability, Attributes, Battle, BattleError, Combatant, Dice,
    EffectClass, Phase, MAX_ROUNDS,
};

fn combatant(
    id: &str,
    level: u32,
    attrs: Attributes,
    abilities: Vec<Ability>,
) -> Combatant {
    Combatant::new(id, id.to_uppercase(), level, attrs, abilities).unwrap()
}

fn attack(power: i64, accuracy: i64, cooldown: i64) -> Ability {
    Ability::new("strike", "Strike", EffectClass::Attack, power, accuracy, cooldown).unwrap()
}

#[test]
fn scenario_a_duel_resolves_to_a_winner() {
    let challenger = combatant("c", 1, Attributes::new(10, 5, 5, 5), vec![attack(20, 100, 0)]);
    let opponent = combatant("o", 1, Attributes::new(10, 1, 5, 5), vec![attack(20, 100, 0)]);

    let battle = simulate("scenario-a", 123_456, challenger, opponent).unwrap();
    assert!(battle.is_finished());
    assert!(battle.winner_id().is_some());
    assert!((1..=MAX_ROUNDS).contains(&battle.round()));
    assert!(battle.experience_gain() >= 5);
    // equal levels: 10 + 1*5
    assert_eq!(battle.experience_gain(), 15);

    let challenger_first = battle
        .log()
        .iter()
        .filter(|e| e.turn == 1 && e.actor_id == "c")
        .count();
    let opponent_first = battle
        .log()
        .iter()
        .filter(|e| e.turn == 1 && e.actor_id == "o")
        .count();
    assert!(challenger_first >= opponent_first);
}

#[test]
fn widest_agility_gap_acts_first_every_round() {
    let challenger = combatant("c", 1, Attributes::new(10, 20, 5, 5), vec![attack(20, 100, 0)]);
    let opponent = combatant("o", 1, Attributes::new(10, 1, 5, 5), vec![attack(20, 100, 0)]);

    let battle = simulate("quick", 77, challenger, opponent).unwrap();
    for entry in battle.log().iter().filter(|e| e.turn == 1) {
        assert_eq!(entry.actor_id, "c", "round {}", entry.round);
    }
}

#[test]
fn scenario_b_healers_draw_at_the_round_cap() {
    let mend = || Ability::new("mend", "Mend", EffectClass::Heal, 10, 100, 0).unwrap();
    let challenger = combatant("c", 1, Attributes::new(10, 5, 5, 5), vec![mend()]);
    let opponent = combatant("o", 1, Attributes::new(10, 1, 5, 5), vec![mend()]);

    let battle = simulate("scenario-b", 99, challenger, opponent).unwrap();
    assert_eq!(battle.round(), MAX_ROUNDS);
    assert!(battle.is_draw());
    assert_eq!(battle.winner_id(), None);
    assert_eq!(battle.experience_gain(), 0);
    assert_eq!(battle.log().len(), 2 * MAX_ROUNDS as usize);
}

#[test]
fn scenario_d_long_cooldown_forces_passes() {
    let guard = Ability::new("guard", "Guard", EffectClass::Defense, 10, 100, 10).unwrap();
    let brace = Ability::new("brace", "Brace", EffectClass::Defense, 10, 100, 0).unwrap();
    let challenger = combatant("c", 1, Attributes::new(10, 5, 5, 5), vec![guard]);
    let opponent = combatant("o", 1, Attributes::new(10, 1, 5, 5), vec![brace]);

    let battle = simulate("scenario-d", 7, challenger, opponent).unwrap();
    let mine: Vec<_> = battle.log().iter().filter(|e| e.actor_id == "c").collect();

    assert_eq!(mine[0].round, 1);
    assert_eq!(mine[0].ability_id, "guard");
    for entry in &mine[1..11] {
        assert!(entry.is_pass(), "round {} should be a pass", entry.round);
        assert!(entry.summary.contains("passes"));
    }
    assert_eq!(mine[11].round, 12);
    assert_eq!(mine[11].ability_id, "guard");
    // and the cycle repeats
    assert_eq!(mine[22].round, 23);
    assert_eq!(mine[22].ability_id, "guard");
}

#[test]
fn knockout_ends_the_round_before_the_second_actor() {
    let brute = combatant(
        "c",
        1,
        Attributes::new(20, 5, 5, 5),
        vec![attack(100, 100, 0)],
    );
    let victim = combatant("o", 1, Attributes::new(5, 1, 1, 5), vec![attack(10, 100, 0)]);
    // initiative 20 vs 1, pick, hit, crit, variance 120%
    let dice = Dice::from_scripted(vec![20, 1, 0, 1, 1, 120]);

    let battle = Battle::with_dice("ko", 0, brute, victim, dice).unwrap().run();
    assert_eq!(battle.round(), 1);
    assert_eq!(battle.log().len(), 1);
    assert_eq!(battle.winner_id(), Some("c"));
    assert_eq!(battle.opponent().hp(), 0);
    assert_eq!(battle.log()[0].defender_health, 0);
    assert_eq!(battle.experience_gain(), 15);
}

#[test]
fn step_walks_the_phases() {
    let a = combatant("c", 1, Attributes::new(10, 5, 5, 5), vec![attack(20, 100, 0)]);
    let b = combatant("o", 1, Attributes::new(10, 5, 5, 5), vec![attack(20, 100, 0)]);
    let battle = Battle::new("phases", 3, a, b).unwrap();
    assert_eq!(battle.phase(), Phase::NotStarted);
    assert_eq!(battle.round(), 0);
    assert!(battle.log().is_empty());
    assert_eq!(battle.experience_gain(), 0);

    let battle = battle.step();
    assert_eq!(battle.round(), 1);
    assert!(!battle.log().is_empty());
    assert!(battle.log().iter().all(|e| e.round == 1));

    let done = battle.run();
    assert_eq!(done.phase(), Phase::Finished);
    let again = done.clone().step();
    assert_eq!(again, done);
}

#[test]
fn log_is_append_only_across_steps() {
    let a = combatant("c", 1, Attributes::new(8, 5, 5, 5), vec![attack(10, 70, 1)]);
    let b = combatant("o", 1, Attributes::new(8, 5, 5, 5), vec![attack(10, 70, 1)]);
    let mut battle = Battle::new("append", 11, a, b).unwrap();
    let mut seen = Vec::new();
    while !battle.is_finished() {
        battle = battle.step();
        assert!(battle.log().starts_with(&seen));
        seen = battle.log().to_vec();
    }
}

#[test]
fn battle_starts_both_sides_rested() {
    let tired = combatant("c", 1, Attributes::new(10, 5, 5, 5), vec![attack(20, 100, 3)])
        .take_damage(60)
        .use_ability("strike");
    let fresh = combatant("o", 1, Attributes::new(10, 5, 5, 5), vec![]);
    let battle = Battle::new("rest", 1, tired, fresh).unwrap();
    assert_eq!(battle.challenger().hp(), battle.challenger().max_hp());
    assert_eq!(battle.challenger().available_abilities().len(), 1);
}

#[test]
fn self_battle_is_rejected() {
    let a = combatant("same", 1, Attributes::new(10, 5, 5, 5), vec![]);
    let err = Battle::new("self", 1, a.clone(), a).unwrap_err();
    assert_eq!(err, BattleError::SelfBattle("same".into()));
}

#[test]
fn experience_scales_with_level_gap() {
    let attrs = Attributes::new(5, 5, 5, 5);
    let l1 = combatant("a", 1, attrs, vec![]);
    let l5 = combatant("b", 5, attrs, vec![]);
    let l10 = combatant("c", 10, attrs, vec![]);
    let l30 = combatant("d", 30, attrs, vec![]);

    assert_eq!(experience_gain(&l1, &l1), 15);
    // (10 + 25) * 1.4
    assert_eq!(experience_gain(&l1, &l5), 49);
    // 15 * 0.1 -> floor 5
    assert_eq!(experience_gain(&l10, &l1), 5);
    // negative multiplier still pays the minimum
    assert_eq!(experience_gain(&l30, &l1), 5);
}

#[test]
fn experience_saturates_at_extreme_levels() {
    let attrs = Attributes::new(5, 5, 5, 5);
    let low = combatant("low", 1, attrs, vec![]);
    let huge = combatant("huge", u32::MAX, attrs, vec![]);

    assert_eq!(experience_gain(&low, &huge), u32::MAX);
    assert_eq!(experience_gain(&huge, &low), 5);
    assert_eq!(experience_gain(&huge, &huge), u32::MAX);
}

#[test]
fn finished_record_serializes_with_rounds_and_winner() {
    let a = combatant("c", 1, Attributes::new(10, 5, 5, 5), vec![attack(20, 100, 0)]);
    let b = combatant("o", 1, Attributes::new(10, 1, 5, 5), vec![attack(20, 100, 0)]);
    let battle = simulate("wire", 5, a, b).unwrap();
    let json: serde_json::Value = serde_json::to_value(&battle).unwrap();
    assert_eq!(json["id"], "wire");
    assert_eq!(json["seed"], 5);
    assert_eq!(json["rounds"], battle.round());
    assert_eq!(json["finished"], true);
    assert_eq!(json["log"].as_array().unwrap().len(), battle.log().len());
    assert!(json.get("dice").is_none());
}
