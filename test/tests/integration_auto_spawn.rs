/// INTEGRATION TESTS: Auto-spawning placeholders into rooms
///
/// Covers room resolution (ancestor room, single candidate, ambiguity),
/// queueing while no room is available, draining on room initialization and
/// the reaction to the spawned entity being destroyed.
use log::Level;

use reactor_client::{
    AutoSpawnConfig, AutoSpawnState, AutoSpawnedEvent, Client, ClientError, ConfigWarning,
    RequeuedEvent, RoomInfo, SpawnOutcome,
};
use reactor_shared::{DestroyReason, OwnerPermissions, Quat, ScaleMode, SpawnTransform, Vec3};
use reactor_test::{log_capture, pump, scene, TestWorld};

fn placeholder_world() -> (TestWorld, reactor_shared::NodeKey) {
    let mut world = TestWorld::new();
    let node = world.add_root("crate", scene(1));
    world.make_placeholder(node, 7);
    (world, node)
}

/// Scenario A: no rooms at all, the placeholder waits in the waitlist
#[test]
fn queues_when_no_room_exists() {
    log_capture::init();
    let (mut world, node) = placeholder_world();
    let mut client = Client::default();

    let key = client.add_auto_spawn(&mut world, node).expect("register");

    assert_eq!(client.auto_spawns().waitlist().len(), 1);
    assert_eq!(client.auto_spawn_state(&world, &key), Ok(AutoSpawnState::Queued));
    assert_eq!(log_capture::count(Level::Warn, "multiple connected rooms"), 0);
    assert_eq!(log_capture::count(Level::Info, "Cannot auto-spawn"), 0);
    assert!(world.spawn_requests().is_empty());
}

/// Scenario B: two candidate rooms is a configuration error
#[test]
fn refuses_ambiguous_rooms() {
    log_capture::init();
    let (mut world, node) = placeholder_world();
    world.add_spawn_room(scene(1), 1);
    world.add_spawn_room(scene(1), 2);
    let mut client = Client::default();

    let key = client.add_auto_spawn(&mut world, node).expect("register");
    assert_eq!(client.try_spawn(&mut world, &key), Ok(SpawnOutcome::Ambiguous));

    assert_eq!(client.auto_spawns().waitlist().len(), 0);
    assert!(world.spawn_requests().is_empty());
    // Once on registration, once on the explicit retry.
    assert_eq!(log_capture::count(Level::Warn, "multiple connected rooms"), 2);
}

#[test]
fn spawns_into_single_candidate() {
    let (mut world, node) = placeholder_world();
    let transform = SpawnTransform::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.5), Vec3::splat(2.0));
    world.set_transform(node, transform);
    world.add_spawn_room(scene(2), 5);
    let room = world.add_spawn_room(scene(1), 9);
    let mut client = Client::default();

    let key = client.add_auto_spawn(&mut world, node).expect("register");

    let (spawn_room, params) = world.spawn_requests()[0].clone();
    assert_eq!(spawn_room, room);
    assert_eq!(params.node, node);
    assert_eq!(params.asset_id, 7);
    assert_eq!(params.transform, transform);
    assert_eq!(params.scale_mode, ScaleMode::Absolute);
    assert_eq!(params.owner_id, Some(9));
    assert_eq!(params.permissions, Some(OwnerPermissions::ALL));
    assert_eq!(client.auto_spawn_state(&world, &key), Ok(AutoSpawnState::Bound));

    let mut events = client.take_events();
    assert_eq!(events.read::<AutoSpawnedEvent>().count(), 1);
}

#[test]
fn spawns_unowned_when_configured() {
    let (mut world, node) = placeholder_world();
    world.add_spawn_room(scene(1), 9);
    let mut client = Client::default();
    let config = AutoSpawnConfig {
        spawn_owned: false,
        ..Default::default()
    };

    client
        .add_auto_spawn_with(&mut world, node, config)
        .expect("register");

    let (_, params) = &world.spawn_requests()[0];
    assert_eq!(params.owner_id, None);
    assert_eq!(params.permissions, None);
}

#[test]
fn ancestor_room_wins_over_scene_rooms() {
    let mut world = TestWorld::new();
    let level = world.add_root("level", scene(1));
    let node = world.add_child(level, "crate");
    world.make_placeholder(node, 7);
    // Two scene candidates would be ambiguous on their own.
    world.add_spawn_room(scene(1), 1);
    world.add_spawn_room(scene(1), 2);
    let bound_room = world.add_room(RoomInfo {
        connected: false,
        allow_player_spawning: true,
        scene: None,
        local_player_id: 3,
    });
    world.bind_room(level, bound_room);
    let mut client = Client::default();

    client.add_auto_spawn(&mut world, node).expect("register");

    assert_eq!(world.spawn_requests().len(), 1);
    assert_eq!(world.spawn_requests()[0].0, bound_room);
    assert_eq!(world.spawn_requests()[0].1.owner_id, Some(3));
}

#[test]
fn room_on_placeholder_itself_is_not_an_ancestor() {
    let (mut world, node) = placeholder_world();
    let own_room = world.add_room(RoomInfo {
        connected: true,
        allow_player_spawning: true,
        scene: Some(scene(9)),
        local_player_id: 1,
    });
    world.bind_room(node, own_room);
    let mut client = Client::default();

    client.add_auto_spawn(&mut world, node).expect("register");

    assert!(world.spawn_requests().is_empty());
    assert_eq!(client.auto_spawns().waitlist().len(), 1);
}

#[test]
fn connected_room_in_other_scene_logs_info_and_queues() {
    log_capture::init();
    let (mut world, node) = placeholder_world();
    world.add_spawn_room(scene(2), 1);
    let mut client = Client::default();

    let key = client.add_auto_spawn(&mut world, node).expect("register");

    assert_eq!(client.auto_spawn_state(&world, &key), Ok(AutoSpawnState::Queued));
    assert_eq!(log_capture::count(Level::Info, "Cannot auto-spawn crate"), 1);
    assert_eq!(log_capture::count(Level::Warn, "multiple connected rooms"), 0);
}

#[test]
fn inactive_placeholder_is_not_queued() {
    let (mut world, node) = placeholder_world();
    world.node_mut(node).expect("node").active = false;
    let mut client = Client::default();

    let key = client.add_auto_spawn(&mut world, node).expect("register");

    assert_eq!(client.try_spawn(&mut world, &key), Ok(SpawnOutcome::Unavailable));
    assert!(client.auto_spawns().waitlist().is_empty());
    assert_eq!(client.auto_spawn_state(&world, &key), Ok(AutoSpawnState::Idle));
}

#[test]
fn room_initialized_drains_matching_scene() {
    let mut world = TestWorld::new();
    let mut client = Client::default();
    let mut keys = Vec::new();
    for (index, scene_id) in [1, 2, 1, 1, 2].into_iter().enumerate() {
        let node = world.add_root(&format!("crate{}", index), scene(scene_id));
        world.make_placeholder(node, 7);
        keys.push(client.add_auto_spawn(&mut world, node).expect("register"));
    }
    assert_eq!(client.auto_spawns().waitlist().len(), 5);

    let room = world.add_room(RoomInfo {
        connected: true,
        allow_player_spawning: true,
        scene: Some(scene(1)),
        local_player_id: 4,
    });
    world.initialize_room(room);
    pump(&mut client, &mut world);

    assert_eq!(world.spawn_requests().len(), 3);
    assert_eq!(client.auto_spawns().waitlist().len(), 2);
    assert!(client
        .auto_spawns()
        .waitlist()
        .iter()
        .all(|request| request.scene == scene(2)));
    let mut events = client.take_events();
    let spawned: Vec<_> = events.read::<AutoSpawnedEvent>().collect();
    assert_eq!(spawned.len(), 3);
    assert!(spawned.iter().all(|(_, spawn_room, _)| *spawn_room == room));
}

#[test]
fn room_without_player_spawning_is_ignored() {
    let (mut world, node) = placeholder_world();
    let mut client = Client::default();
    client.add_auto_spawn(&mut world, node).expect("register");

    let room = world.add_room(RoomInfo {
        connected: true,
        allow_player_spawning: false,
        scene: Some(scene(1)),
        local_player_id: 4,
    });
    world.initialize_room(room);
    pump(&mut client, &mut world);

    assert!(world.spawn_requests().is_empty());
    assert_eq!(client.auto_spawns().waitlist().len(), 1);
}

#[test]
fn queued_placeholder_made_permanent_is_dropped_silently() {
    let (mut world, node) = placeholder_world();
    let mut client = Client::default();
    let key = client.add_auto_spawn(&mut world, node).expect("register");
    world.binding_mut(node).expect("binding").permanent = true;

    let room = world.add_spawn_room(scene(1), 1);
    world.initialize_room(room);
    pump(&mut client, &mut world);

    assert!(world.spawn_requests().is_empty());
    assert!(client.auto_spawns().waitlist().is_empty());
    assert_eq!(client.auto_spawn_state(&world, &key), Ok(AutoSpawnState::Idle));
}

#[test]
fn rejected_spawn_leaves_placeholder_idle() {
    let (mut world, node) = placeholder_world();
    world.add_spawn_room(scene(1), 1);
    world.set_reject_spawns(true);
    let mut client = Client::default();

    let key = client.add_auto_spawn(&mut world, node).expect("register");

    assert_eq!(client.try_spawn(&mut world, &key), Ok(SpawnOutcome::Rejected));
    assert!(client.auto_spawns().waitlist().is_empty());
    assert_eq!(client.subscriptions().len(), 0);
}

#[test]
fn disconnect_requeues_and_respawns() {
    let (mut world, node) = placeholder_world();
    let room = world.add_spawn_room(scene(1), 1);
    let mut client = Client::default();
    let key = client.add_auto_spawn(&mut world, node).expect("register");
    pump(&mut client, &mut world);
    let entity = client
        .auto_spawns()
        .get(&key)
        .and_then(|auto_spawn| auto_spawn.observed_entity())
        .expect("spawned");

    world.destroy_entity(entity, DestroyReason::Disconnect);
    pump(&mut client, &mut world);

    assert_eq!(client.auto_spawn_state(&world, &key), Ok(AutoSpawnState::Queued));
    assert_eq!(client.take_events().read::<RequeuedEvent>().count(), 1);

    world.initialize_room(room);
    pump(&mut client, &mut world);
    assert_eq!(world.spawn_requests().len(), 2);
    assert_eq!(client.auto_spawn_state(&world, &key), Ok(AutoSpawnState::Bound));
}

#[test]
fn other_destroy_reasons_disable_the_auto_spawn() {
    let (mut world, node) = placeholder_world();
    world.add_spawn_room(scene(1), 1);
    let mut client = Client::default();
    let key = client.add_auto_spawn(&mut world, node).expect("register");
    pump(&mut client, &mut world);
    assert_eq!(world.spawn_requests().len(), 1);
    let entity = client
        .auto_spawns()
        .get(&key)
        .and_then(|auto_spawn| auto_spawn.observed_entity())
        .expect("spawned");

    world.destroy_entity(entity, DestroyReason::Server);
    pump(&mut client, &mut world);

    assert_eq!(client.auto_spawn_state(&world, &key), Ok(AutoSpawnState::Disabled));
    assert!(client.auto_spawns().waitlist().is_empty());
    assert!(client.subscriptions().is_empty());

    client.take_events();

    // Re-enabling tries again straight away.
    let outcome = client
        .set_auto_spawn_enabled(&mut world, &key, true)
        .expect("enable");
    assert!(matches!(outcome, Some(SpawnOutcome::Spawned { .. })));
    assert_eq!(world.spawn_requests().len(), 2);
    assert_eq!(client.auto_spawn_state(&world, &key), Ok(AutoSpawnState::Bound));
    let spawned: Vec<_> = client.take_events().read::<AutoSpawnedEvent>().collect();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].0, key);

    // Enabling an already enabled auto-spawn makes no attempt.
    assert_eq!(client.set_auto_spawn_enabled(&mut world, &key, true), Ok(None));
    assert!(!client.take_events().has::<AutoSpawnedEvent>());
}

#[test]
fn disconnect_without_scene_is_not_requeued() {
    let (mut world, node) = placeholder_world();
    world.add_spawn_room(scene(1), 1);
    let mut client = Client::default();
    let key = client.add_auto_spawn(&mut world, node).expect("register");
    pump(&mut client, &mut world);
    client.take_events();
    let entity = client
        .auto_spawns()
        .get(&key)
        .and_then(|auto_spawn| auto_spawn.observed_entity())
        .expect("spawned");

    world.node_mut(node).expect("node").scene = None;
    world.destroy_entity(entity, DestroyReason::Disconnect);
    pump(&mut client, &mut world);

    assert!(client.auto_spawns().waitlist().is_empty());
    assert!(!client.take_events().has::<RequeuedEvent>());
}

#[test]
fn destroy_with_server_ignores_destruction() {
    let (mut world, node) = placeholder_world();
    world.binding_mut(node).expect("binding").destroy_with_server = true;
    world.add_spawn_room(scene(1), 1);
    let mut client = Client::default();
    let key = client.add_auto_spawn(&mut world, node).expect("register");
    let entity = client
        .auto_spawns()
        .get(&key)
        .and_then(|auto_spawn| auto_spawn.observed_entity())
        .expect("spawned");

    world.destroy_entity(entity, DestroyReason::Disconnect);
    pump(&mut client, &mut world);

    // The node went down with the entity, taking the auto-spawn with it.
    assert!(client.auto_spawns().get(&key).is_none());
    assert!(client.auto_spawns().waitlist().is_empty());
    reactor_test::assert_no_subscriptions!(client);
}

#[test]
fn disabled_auto_spawn_ignores_disconnect() {
    let (mut world, node) = placeholder_world();
    world.add_spawn_room(scene(1), 1);
    let mut client = Client::default();
    let key = client.add_auto_spawn(&mut world, node).expect("register");
    let entity = client
        .auto_spawns()
        .get(&key)
        .and_then(|auto_spawn| auto_spawn.observed_entity())
        .expect("spawned");
    client
        .set_auto_spawn_enabled(&mut world, &key, false)
        .expect("disable");

    world.destroy_entity(entity, DestroyReason::Disconnect);
    pump(&mut client, &mut world);

    assert_eq!(client.auto_spawn_state(&world, &key), Ok(AutoSpawnState::Disabled));
    assert!(client.auto_spawns().waitlist().is_empty());
}

#[test]
fn disabling_removes_from_waitlist() {
    let (mut world, node) = placeholder_world();
    let mut client = Client::default();
    let key = client.add_auto_spawn(&mut world, node).expect("register");
    assert_eq!(client.auto_spawns().waitlist().len(), 1);

    client
        .set_auto_spawn_enabled(&mut world, &key, false)
        .expect("disable");
    assert!(client.auto_spawns().waitlist().is_empty());

    client
        .set_auto_spawn_enabled(&mut world, &key, true)
        .expect("enable");
    assert_eq!(client.auto_spawns().waitlist().len(), 1);
}

#[test]
fn refuses_node_bound_by_remote_player() {
    let (mut world, node) = placeholder_world();
    let room = world.add_spawn_room(scene(1), 1);
    let entity = world.attach_entity(room, node, 2);
    let mut client = Client::default();

    assert_eq!(
        client.add_auto_spawn(&mut world, node),
        Err(ClientError::SpawnedByRemotePlayer { node, entity })
    );
    assert!(client.auto_spawns().is_empty());
}

#[test]
fn refuses_node_without_binding() {
    let mut world = TestWorld::new();
    let node = world.add_root("plain", scene(1));
    let mut client = Client::default();

    assert_eq!(
        client.add_auto_spawn(&mut world, node),
        Err(ClientError::MissingEntityBinding { node })
    );
}

#[test]
fn configuration_warnings() {
    let (mut world, node) = placeholder_world();
    let mut client = Client::default();
    let key = client.add_auto_spawn(&mut world, node).expect("register");
    assert_eq!(client.auto_spawn_warning(&world, &key), Ok(None));

    world.binding_mut(node).expect("binding").asset_id = 0;
    assert_eq!(
        client.auto_spawn_warning(&world, &key),
        Ok(Some(ConfigWarning::MissingAssetId))
    );

    let binding = world.binding_mut(node).expect("binding");
    binding.asset_id = 7;
    binding.permanent = true;
    assert_eq!(
        client.auto_spawn_warning(&world, &key),
        Ok(Some(ConfigWarning::PermanentEntity))
    );
}
