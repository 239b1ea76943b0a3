use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use log::info;

use crate::simulation::controller::SimulationController;
use crate::simulation::springs::SpringState;
use crate::simulation::states::Vec2 as SimVec2;

#[derive(Component)]
struct OverlayText;

const RESOLUTION: f32 = 512.0;
const PARTICLE_RADIUS: f32 = 5.0;
const ADJUST_FACTOR: f32 = 1.1; // S / D scale stiffness and damping by this

pub fn run_2d(sim: SimulationController) {
    info!("run_2d: starting Bevy 2D viewer with {} particles", sim.particle_count());

    App::new()
        .insert_resource(sim)
        .insert_resource(ClearColor(Color::srgb_u8(0xdd, 0xdd, 0xdd)))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Mass-Spring System".into(),
                        resolution: (RESOLUTION, RESOLUTION).into(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                // env_logger already owns the `log` facade
                .disable::<bevy::log::LogPlugin>(),
        )
        .add_systems(Startup, setup_system)
        .add_systems(
            Update,
            (input_system, physics_step_system, draw_system, overlay_system).chain(),
        )
        .run();
}

/// Unit square of the simulation onto the centred window
fn to_screen(p: SimVec2) -> Vec2 {
    Vec2::new((p.x - 0.5) * RESOLUTION, (p.y - 0.5) * RESOLUTION)
}

fn spring_color(state: SpringState) -> Color {
    match state {
        SpringState::Elongating => Color::srgb_u8(0xff, 0x00, 0x00),
        SpringState::Compressing => Color::srgb_u8(0x00, 0xff, 0x00),
        SpringState::Neutral => Color::srgb_u8(0x44, 0x55, 0x66),
    }
}

fn setup_system(mut commands: Commands) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 16.0,
                color: Color::BLACK,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(6.0),
            left: Val::Px(6.0),
            ..default()
        }),
        OverlayText,
    ));
}

fn input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sim: ResMut<SimulationController>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
    if keys.just_pressed(KeyCode::Space) {
        sim.toggle_pause();
    }
    if keys.just_pressed(KeyCode::KeyC) {
        sim.reset();
    }

    let shift = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let factor = if shift { ADJUST_FACTOR.recip() } else { ADJUST_FACTOR };
    if keys.just_pressed(KeyCode::KeyS) {
        sim.adjust_stiffness(factor);
    }
    if keys.just_pressed(KeyCode::KeyD) {
        sim.adjust_damping(factor);
    }

    if mouse.just_pressed(MouseButton::Left) {
        let Ok(window) = windows.get_single() else {
            return;
        };
        if let Some(cursor) = window.cursor_position() {
            // cursor origin is the top-left corner
            let x = cursor.x / window.width();
            let y = 1.0 - cursor.y / window.height();
            // a full store is logged by the controller and otherwise ignored
            let _ = sim.add_particle(x, y);
        }
    }
}

fn physics_step_system(mut sim: ResMut<SimulationController>) {
    sim.advance_frame();
}

fn draw_system(sim: Res<SimulationController>, mut gizmos: Gizmos) {
    let ground = sim.params().ground_height;
    gizmos.line_2d(
        to_screen(SimVec2::new(0.0, ground)),
        to_screen(SimVec2::new(1.0, ground)),
        Color::BLACK,
    );

    let particles = sim.particles();
    for spring in sim.springs() {
        gizmos.line_2d(
            to_screen(particles[spring.i].x),
            to_screen(particles[spring.j].x),
            spring_color(spring.state),
        );
    }

    for p in particles {
        gizmos.circle_2d(to_screen(p.x), PARTICLE_RADIUS, Color::srgb_u8(0xff, 0xaa, 0x77));
    }
}

fn overlay_system(sim: Res<SimulationController>, mut query: Query<&mut Text, With<OverlayText>>) {
    let params = sim.params();
    let e = sim.energy();
    let paused = if sim.is_paused() { " (paused)" } else { "" };

    for mut text in &mut query {
        text.sections[0].value = format!(
            "C: clear all; Space: pause{paused}\n\
             S: Spring stiffness {:.1}\n\
             D: damping {:.2}\n\
             Number of particles {}\n\
             Origin energy {:.2}\n\
             Current energy {:.2}\n\
             Lost energy {:.2}\n\
             Damp energy {:.2}\n\
             Total energy {:.2}\n\
             Error energy {:.2}",
            params.spring_stiffness,
            params.damping,
            sim.particle_count(),
            e.origin,
            e.current,
            e.lost,
            e.damp,
            e.total,
            e.error,
        );
    }
}
