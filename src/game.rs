//! The session controller: owns the ECS world and the per-frame schedule.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use tracing::{debug, info, instrument};

use crate::audio::{Audio, AudioSink};
use crate::constants::{popup, VIEWPORT_SIZE};
use crate::entity::player::Player;
use crate::error::GameResult;
use crate::events::{GameCommand, GameEvent, HeldInput, Outcome};
use crate::level::LevelConfig;
use crate::save::SaveManager;
use crate::score::ScoreManager;
use crate::systems::{
    self, AudioEvent, BossPhase, DeferredActions, GameRng, Items, Obstacles, Parallax, Popups, Scroll, Session,
    SessionStage, SimClock, SpawnMode, SpawnTimer,
};

/// Ordering of the per-frame systems.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum SimSet {
    /// Commands are applied even while paused so that the pause can be lifted
    Input,
    /// Clock, deferred actions, player, energy, scroll and entity motion
    Update,
    /// The standard or boss spawner
    Spawn,
    /// Collisions and the completion check
    Resolve,
    /// Popups and audio output
    Present,
}

/// The host-side collaborators a session borrows for its lifetime.
pub struct Collaborators {
    pub audio: Box<dyn AudioSink>,
    pub save: SaveManager,
}

/// A single level's simulation.
///
/// The host feeds commands with [`Game::send`] and advances time with [`Game::tick`]. Time only
/// moves while the session is running, so a paused session is fully frozen.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Loads `level` and zeroes every session counter. The session stays in INIT until [`Game::start`].
    ///
    /// # Errors
    ///
    /// Returns `GameError::Level` if `level` is not a known level number.
    #[instrument(skip(collaborators))]
    pub fn new(level: u8, collaborators: Collaborators, seed: Option<u64>) -> GameResult<Game> {
        let config = LevelConfig::for_number(level)?;
        let mut world = World::default();
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<AudioEvent>(&mut world);

        Self::setup_resources(&mut world, config, collaborators, seed);
        Self::configure_schedule(&mut schedule);

        info!(
            level = %config.id,
            length = config.length,
            base_speed = config.base_speed,
            background = %config.background,
            boss = config.boss_phase,
            "Level loaded"
        );

        Ok(Game { world, schedule })
    }

    fn setup_resources(world: &mut World, config: LevelConfig, collaborators: Collaborators, seed: Option<u64>) {
        let session = Session::new(config);
        let boss = session.mode == SpawnMode::Boss;

        world.insert_resource(session);
        world.insert_resource(SimClock::default());
        world.insert_resource(GameRng::new(seed));
        world.insert_resource(Scroll::new(&config));
        world.insert_resource(Parallax::default());
        world.insert_resource(Obstacles::default());
        world.insert_resource(Items::default());
        world.insert_resource(DeferredActions::default());
        world.insert_resource(HeldInput::default());
        world.insert_resource(Player::default());
        world.insert_resource(ScoreManager::new(config.id));
        world.insert_resource(collaborators.save);
        world.insert_resource(Audio::new(collaborators.audio));
        world.insert_resource(SpawnTimer::default());

        let mut popups = Popups::default();
        if boss {
            world.insert_resource(BossPhase::default());
            popups.banner(
                "The Nian approaches!".to_string(),
                VIEWPORT_SIZE / 2.0,
                popup::RED,
                popup::BANNER_MS,
                0.0,
            );
        }
        world.insert_resource(popups);
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                systems::command_system.in_set(SimSet::Input),
                (
                    systems::clock_system,
                    systems::deferred_system,
                    systems::player_system,
                    systems::energy_system,
                    systems::scroll_system,
                    systems::parallax_system,
                    systems::entity_update_system,
                )
                    .chain()
                    .in_set(SimSet::Update),
                (
                    systems::spawn_system.run_if(systems::is_standard_mode),
                    systems::boss_system.run_if(systems::is_boss_mode),
                )
                    .in_set(SimSet::Spawn),
                (systems::collision_system, systems::completion_system)
                    .chain()
                    .in_set(SimSet::Resolve),
                (systems::popup_system.run_if(systems::is_running), systems::audio_system)
                    .chain()
                    .in_set(SimSet::Present),
            ))
            .configure_sets(
                (
                    SimSet::Input,
                    SimSet::Update.run_if(systems::is_running),
                    SimSet::Spawn.run_if(systems::is_running),
                    SimSet::Resolve.run_if(systems::is_running),
                    SimSet::Present,
                )
                    .chain(),
            );
    }

    /// INIT to RUNNING, starting the level music. Returns false if the session had already started.
    pub fn start(&mut self) -> bool {
        let started = self.world.resource_mut::<Session>().start();
        if started {
            self.world.resource_mut::<Audio>().play_music();
        }
        started
    }

    /// Queues a command for the next tick.
    pub fn send(&mut self, command: GameCommand) {
        self.world.send_event(GameEvent::from(command));
    }

    /// Runs one frame of `delta_ms` milliseconds.
    ///
    /// Returns true once the session is over.
    pub fn tick(&mut self, delta_ms: f64) -> bool {
        self.world.resource_mut::<SimClock>().delta_ms = delta_ms.max(0.0);
        self.schedule.run(&mut self.world);

        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();

        self.world.resource::<Session>().is_over()
    }

    /// Suspends frame updates. Audio is paused immediately.
    pub fn pause(&mut self) -> bool {
        let paused = self.world.resource_mut::<Session>().pause();
        if paused {
            self.world.resource_mut::<Audio>().pause_all();
        }
        paused
    }

    pub fn resume(&mut self) -> bool {
        let resumed = self.world.resource_mut::<Session>().resume();
        if resumed {
            self.world.resource_mut::<Audio>().resume_all();
        }
        resumed
    }

    pub fn stage(&self) -> SessionStage {
        self.world.resource::<Session>().stage()
    }

    pub fn is_over(&self) -> bool {
        self.stage() == SessionStage::Over
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.world.resource::<Session>().outcome()
    }

    pub fn level(&self) -> &LevelConfig {
        &self.world.resource::<Session>().level
    }

    pub fn player(&self) -> &Player {
        self.world.resource::<Player>()
    }

    pub fn player_mut(&mut self) -> bevy_ecs::world::Mut<'_, Player> {
        self.world.resource_mut::<Player>()
    }

    pub fn score(&self) -> &ScoreManager {
        self.world.resource::<ScoreManager>()
    }

    pub fn score_mut(&mut self) -> bevy_ecs::world::Mut<'_, ScoreManager> {
        self.world.resource_mut::<ScoreManager>()
    }

    pub fn save(&self) -> &SaveManager {
        self.world.resource::<SaveManager>()
    }

    pub fn scroll(&self) -> &Scroll {
        self.world.resource::<Scroll>()
    }

    pub fn parallax(&self) -> &Parallax {
        self.world.resource::<Parallax>()
    }

    pub fn obstacles(&self) -> &Obstacles {
        self.world.resource::<Obstacles>()
    }

    pub fn obstacles_mut(&mut self) -> bevy_ecs::world::Mut<'_, Obstacles> {
        self.world.resource_mut::<Obstacles>()
    }

    pub fn items(&self) -> &Items {
        self.world.resource::<Items>()
    }

    pub fn items_mut(&mut self) -> bevy_ecs::world::Mut<'_, Items> {
        self.world.resource_mut::<Items>()
    }

    pub fn popups(&self) -> &Popups {
        self.world.resource::<Popups>()
    }

    pub fn boss(&self) -> Option<&BossPhase> {
        self.world.get_resource::<BossPhase>()
    }

    pub fn now_ms(&self) -> f64 {
        self.world.resource::<SimClock>().now_ms
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.world.resource_mut::<Audio>().set_mute(muted);
    }

    /// Clears pools, pending timers, popups and held input, and stops all audio.
    ///
    /// Nothing scheduled before teardown can fire afterwards.
    pub fn teardown(&mut self) {
        self.world.resource_mut::<Obstacles>().0.clear_all();
        self.world.resource_mut::<Items>().0.clear_all();
        self.world.resource_mut::<DeferredActions>().0.clear();
        self.world.resource_mut::<Popups>().clear();
        self.world.resource_mut::<HeldInput>().0 = Default::default();
        self.world.resource_mut::<Events<GameEvent>>().clear();
        self.world.resource_mut::<Events<AudioEvent>>().clear();
        self.world.resource_mut::<Audio>().stop_all();
        debug!("Session torn down");
    }

    /// Tears the session down and hands the collaborators back to the host.
    pub fn finish(mut self) -> Collaborators {
        self.teardown();
        let save = self.world.remove_resource::<SaveManager>().unwrap_or_else(SaveManager::in_memory);
        let audio = match self.world.remove_resource::<Audio>() {
            Some(audio) => audio.into_sink(),
            None => Box::new(crate::audio::NullAudio),
        };
        Collaborators { audio, save }
    }
}
