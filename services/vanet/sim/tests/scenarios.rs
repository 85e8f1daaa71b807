//! End-to-end delivery scenarios through the public network facade.

use vanet_sim::{
    BfsRouter, DeliveryMode, DeliveryOutcome, DropReason, HopPolicy, Message, Network, Path,
    Position, Tag, Velocity,
};

fn line_network(range: f64, xs: &[f64]) -> Network {
    let mut network = Network::new(range, 2024).unwrap();
    for (i, &x) in xs.iter().enumerate() {
        network
            .add_vehicle(Position::new(x, 10.0), Velocity::default(), format!("k{}", i))
            .unwrap();
    }
    network
}

fn flip_tag_byte(message: &Message, index: usize) -> Message {
    let mut bytes = message.tag.as_bytes().to_vec();
    bytes[index] ^= 0x20;
    let mut forged = message.clone();
    forged.tag = Tag::new(String::from_utf8(bytes).unwrap());
    forged
}

#[test]
fn single_hop_within_range() {
    let mut network = line_network(50.0, &[10.0, 40.0]);
    let message = network.make_message(0, 1, &b"hello"[..], 8);

    assert_eq!(
        network.deliver(&message),
        DeliveryOutcome::Delivered {
            mode: DeliveryMode::SingleHop,
            path: Path::direct(0, 1),
            hop_count: 1,
        }
    );
}

#[test]
fn multi_hop_when_chain_connects() {
    let mut network = line_network(50.0, &[10.0, 40.0, 80.0, 120.0]);
    assert!(!network.model().graph().are_adjacent(0, 3));

    let message = network.make_message(0, 3, &b"relay me"[..], 8);
    assert_eq!(
        network.deliver(&message),
        DeliveryOutcome::Delivered {
            mode: DeliveryMode::MultiHop,
            path: Path::new(vec![0, 1, 2, 3]),
            hop_count: 3,
        }
    );
}

#[test]
fn no_route_when_chain_breaks() {
    // 40-unit gaps are out of reach at range 35; only 0-1 (30) stays linked
    let mut network = line_network(35.0, &[10.0, 40.0, 80.0, 120.0]);
    assert!(network.model().graph().are_adjacent(0, 1));

    let message = network.make_message(0, 3, &b"relay me"[..], 8);
    assert_eq!(
        network.deliver(&message),
        DeliveryOutcome::Failed
    );
}

#[test]
fn vehicle_reflects_off_far_edge() {
    let mut network = Network::new(50.0, 0).unwrap();
    let id = network
        .add_vehicle(Position::new(795.0, 300.0), Velocity::new(40.0, 0.0), &b"k"[..])
        .unwrap();

    network.step(1.0, 800.0, 600.0).unwrap();

    let node = network.model().node(id).unwrap();
    assert_eq!(node.position.x, 800.0);
    assert_eq!(node.velocity.vx, -40.0);
}

#[test]
fn tampered_tag_is_never_delivered() {
    for (xs, destination) in [
        (&[10.0, 40.0][..], 1usize),
        (&[10.0, 40.0, 80.0, 120.0][..], 3usize),
    ] {
        let mut network = line_network(50.0, xs);
        let message = network.make_message(0, destination, &b"brake"[..], 8);

        for index in 0..message.tag.as_str().len() {
            let forged = flip_tag_byte(&message, index);
            assert!(!network.verify_at_hop(&forged));
            assert_eq!(
                network.deliver(&forged).drop_reason(),
                Some(DropReason::AuthFailure),
                "tag byte {} on a path to {}",
                index,
                destination
            );
        }

        assert!(network.deliver(&message).is_delivered());
    }
}

#[test]
fn delivery_follows_motion() {
    let mut network = Network::new(50.0, 3).unwrap();
    network
        .add_road_side_unit(Position::new(100.0, 100.0), &b"rsu"[..])
        .unwrap();
    network
        .add_vehicle(Position::new(200.0, 100.0), Velocity::new(-20.0, 0.0), &b"car"[..])
        .unwrap();

    let mut outcomes = Vec::new();
    for _ in 0..4 {
        network.step(1.0, 800.0, 600.0).unwrap();
        outcomes.push(network.send(1, 0, &b"ping"[..], 4).is_delivered());
    }

    // Distances after each step: 80, 60, 40, 20
    assert_eq!(outcomes, vec![false, false, true, true]);
    let stats = network.delivery_stats();
    assert_eq!(stats.failed_no_route, 2);
    assert_eq!(stats.delivered_single_hop, 2);
}

#[test]
fn hop_limit_is_opt_in() {
    let xs = [10.0, 40.0, 80.0, 120.0];

    let mut legacy = line_network(50.0, &xs);
    assert!(legacy.send(0, 3, &b"x"[..], 1).is_delivered());

    let mut strict = Network::with_router(50.0, BfsRouter::with_policy(HopPolicy::EnforceTtl), 7)
        .unwrap();
    for (i, &x) in xs.iter().enumerate() {
        strict
            .add_vehicle(Position::new(x, 10.0), Velocity::default(), format!("k{}", i))
            .unwrap();
    }
    assert_eq!(
        strict.send(0, 3, &b"x"[..], 1),
        DeliveryOutcome::Failed
    );
    assert!(strict.send(0, 3, &b"x"[..], 3).is_delivered());
}

#[test]
fn enforced_hop_limit_covers_direct_neighbors() {
    let mut strict = Network::with_router(50.0, BfsRouter::with_policy(HopPolicy::EnforceTtl), 5)
        .unwrap();
    for x in [10.0, 40.0] {
        strict
            .add_vehicle(Position::new(x, 10.0), Velocity::default(), &b"k"[..])
            .unwrap();
    }
    assert!(strict.model().graph().are_adjacent(0, 1));

    assert_eq!(strict.send(0, 1, &b"x"[..], 0), DeliveryOutcome::Failed);
    assert_eq!(strict.send(0, 1, &b"x"[..], 1).hop_count(), Some(1));

    // Without the policy the same zero budget still reaches the neighbor
    let mut legacy = line_network(50.0, &[10.0, 40.0]);
    assert!(legacy.send(0, 1, &b"x"[..], 0).is_delivered());
}
