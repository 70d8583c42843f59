//! Example integrating a family of damped pendulums
//!
//! Each pendulum starts at the bottom with a different initial speed. The
//! state is an order-1 tensor `[angle, angular velocity]` and the equation of
//! motion is
//!
//! ```text
//! angle'    = velocity
//! velocity' = -gamma * velocity - w0^2 * sin(angle)
//! ```
//!
//! Run with: cargo run --example damped_pendulum

use anyhow::Result;
use tensode_core::{RealField, Tensor, TensorResult};
use tensode_kernels::TensorField;
use tensode_ode::{AdaptiveRk4, Rk4Config};

/// Squared natural frequency
const W0_SQUARED: f64 = 1.0;
/// Damping coefficient
const GAMMA: f64 = 0.1;

fn pendulum(_t: f64, state: &Tensor<f64>) -> TensorResult<Tensor<f64>> {
    let angle = *state.get(&[0])?;
    let velocity = *state.get(&[1])?;
    Tensor::new(
        1,
        2,
        vec![velocity, -GAMMA * velocity - W0_SQUARED * angle.sin()],
    )
}

/// Mechanical energy per unit inertia
fn energy(state: &Tensor<f64>) -> TensorResult<f64> {
    let angle = *state.get(&[0])?;
    let velocity = *state.get(&[1])?;
    Ok(0.5 * velocity * velocity + W0_SQUARED * (1.0 - angle.cos()))
}

fn main() -> Result<()> {
    println!("=== Damped Pendulum Family ===\n");

    let field = TensorField::<f64, _>::new(RealField);
    let nominal_step = 0.01;
    let config = Rk4Config::new()
        .with_span(0.0, 20.0)
        .with_nominal_step(nominal_step)
        .with_min_step(nominal_step / 1000.0);
    let solver = AdaptiveRk4::new(config)?;

    println!(
        "Integrating over [{}, {}] with step {} (floor {})\n",
        config.t_start, config.t_end, config.nominal_step, config.min_step
    );
    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>10} {:>8}",
        "v0", "angle(20)", "vel(20)", "energy(20)", "evals", "floors"
    );

    let states = 11;
    for n in 0..states {
        let v0 = 0.6 * n as f64 - 3.0;
        let y0 = Tensor::new(1, 2, vec![0.0, v0])?;

        let trajectory = solver.integrate(&y0, |err: &f64| *err > 1e-6, pendulum, &field)?;

        let end = trajectory
            .final_state()
            .ok_or_else(|| anyhow::anyhow!("empty trajectory"))?;
        println!(
            "{:>10.3} {:>12.6} {:>12.6} {:>12.6} {:>10} {:>8}",
            v0,
            end.get(&[0])?,
            end.get(&[1])?,
            energy(end)?,
            trajectory.derivative_evaluations(),
            trajectory.floor_hits()
        );

        // Damping only removes energy
        let e0 = energy(&y0)?;
        if energy(end)? > e0 + 1e-9 {
            anyhow::bail!("energy grew for v0 = {}", v0);
        }
    }

    println!("\nAll pendulums lost energy as expected.");
    Ok(())
}
