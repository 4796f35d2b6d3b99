use nalgebra::dvector;

use glc_planner::glc::{GlcPlanner, PlannerConfig};
use glc_planner::models::{
    control_grid, BallGoal, DoubleIntegrator, MinTimeCost, MinTimeHeuristic, SphereObstacles,
};
use glc_planner::utils::{colors, PathStyle, Visualizer};

fn main() {
    println!("GLC trajectory planning start!!");

    // Obstacle list (x, y, radius)
    let obstacle_list = vec![
        (3.0, 4.0, 1.5),
        (6.0, 5.0, 1.5),
        (4.5, 7.5, 1.0),
        (7.5, 2.0, 1.0),
    ];
    let start = (0.0, 0.0);
    let goal_center = (8.0, 8.0);
    let goal_radius = 0.5;

    let config = PlannerConfig {
        state_dim: 4,
        resolution: 10.0,
        time_scale: 12.0,
        depth_scale: 1.0,
        partition_scale: 5.0,
        max_iter: 200_000,
        x0: dvector![start.0, start.1, 0.0, 0.0],
        controls: control_grid(&[-1.0, 0.0, 1.0], 2),
    };

    let obstacles = SphereObstacles::new(
        obstacle_list
            .iter()
            .map(|&(x, y, r)| (dvector![x, y], r))
            .collect(),
    );
    let goal = BallGoal::new(dvector![goal_center.0, goal_center.1], goal_radius);
    let heuristic = MinTimeHeuristic::new(
        dvector![goal_center.0, goal_center.1],
        goal_radius,
        2.0_f64.sqrt(),
    );

    let mut planner = match GlcPlanner::new(
        config,
        DoubleIntegrator::new(2),
        MinTimeCost,
        heuristic,
        obstacles,
        goal,
    ) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to build planner: {}", e);
            return;
        }
    };

    let output = match planner.plan() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Planning aborted: {}", e);
            return;
        }
    };

    println!("      Iterations: {}", planner.iterations());
    println!("     Simulations: {}", planner.sim_count());
    println!("      Tree nodes: {}", planner.num_nodes());
    if planner.found_goal() {
        println!("    Cost to goal: {:.4}", output.cost);
        println!("       Wall time: {:.3} s", output.time);
    } else {
        println!("No trajectory found ({:?})", planner.termination());
    }

    // Visualization
    let mut vis = Visualizer::new();
    vis.set_title("GLC Trajectory Planning");
    vis.set_x_range(-1.0, 11.0);
    vis.set_y_range(-1.0, 11.0);

    for &(x, y, r) in &obstacle_list {
        vis.plot_circle(x, y, r, colors::OBSTACLE);
    }

    let mut edges = Vec::new();
    for id in 1..planner.num_nodes() {
        let node = planner.node(id);
        if let Some(p) = node.parent {
            let parent = planner.node(p);
            edges.push((parent.x[0], parent.x[1], node.x[0], node.x[1]));
        }
    }
    vis.plot_segments(&edges, colors::TREE);

    if let Some(solution) = planner.solution() {
        vis.plot_trajectory(&solution, &PathStyle::default());
    }
    vis.plot_circle(goal_center.0, goal_center.1, goal_radius, colors::GOAL);
    vis.plot_start(start.0, start.1);

    std::fs::create_dir_all("img").ok();
    let output_path = "img/glc_result.png";
    match vis.save_png(output_path, 800, 600) {
        Ok(()) => println!("Plot saved to: {}", output_path),
        Err(e) => eprintln!("Failed to save plot: {}", e),
    }

    println!("GLC trajectory planning finish!!");
}
