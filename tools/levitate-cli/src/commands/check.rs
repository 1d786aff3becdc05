//! Validate motion tuning.

use std::path::PathBuf;

use levitate_motion_core::hover_spring::HoverSpringAnimator;

pub fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let spring = config.motion.spring;

    println!("Levitate Motion Check");
    println!("{}", "=".repeat(50));

    let coefficient = spring.damping_coefficient();
    println!("  gravity            {:>10.3}", spring.gravity);
    println!("  spring strength    {:>10.3}", spring.spring_strength);
    println!("  damping ratio      {:>10.3}", spring.damping_ratio);
    println!("  damping coeff.     {:>10.3} /s", coefficient);
    println!("  lift height        {:>10.3}", spring.lift_height);
    println!("  restitution        {:>10.3}", spring.bounce_restitution);
    println!("  settle speed       {:>10.3}", spring.settle_speed);
    println!("  max delta          {:>10.4} s", spring.max_delta);
    println!("  spin               {:>10.3} rad/s", config.motion.spin.angular_speed);
    println!();

    if let Err(e) = config.motion.validate() {
        println!("[FAIL] {e}");
        anyhow::bail!("motion configuration is invalid");
    }

    let animator = HoverSpringAnimator::new(spring);
    println!(
        "[OK] Damping step per frame at max delta: {:.3} (< 1.0)",
        animator.damping_coefficient() * spring.max_delta
    );
    if !(1.0..=2.0).contains(&spring.lift_height) {
        println!(
            "[WARN] lift height {:.2} is outside the usual 1.0..2.0 band",
            spring.lift_height
        );
    }
    if spring.damping_ratio < 0.5 {
        println!("[WARN] damping ratio below 0.5 gives a visibly wobbly lift");
    }

    println!();
    println!("Motion configuration is valid.");
    Ok(())
}
