//! Visualization utilities for glc_planner
//!
//! Provides a small layered plotting interface over gnuplot for
//! planned trajectories, search trees, and obstacle geometry.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::Trajectory;

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const GRAY: &str = "#808080";
    pub const ORANGE: &str = "#FFA500";

    // Semantic colors
    pub const OBSTACLE: &str = BLACK;
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const PATH: &str = RED;
    pub const TREE: &str = GRAY;
}

/// Style for line rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::PATH.to_string(),
            line_width: 2.0,
            caption: "Path".to_string(),
        }
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }
}

#[derive(Debug)]
enum Layer {
    Lines {
        x: Vec<f64>,
        y: Vec<f64>,
        color: String,
        width: f64,
        caption: Option<String>,
    },
    Points {
        x: Vec<f64>,
        y: Vec<f64>,
        color: String,
        size: f64,
        symbol: char,
        caption: Option<String>,
    },
}

/// Layered 2D plot builder; layers render in insertion order
pub struct Visualizer {
    layers: Vec<Layer>,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    aspect_ratio: Option<f64>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            title: String::new(),
            x_label: "X [m]".to_string(),
            y_label: "Y [m]".to_string(),
            x_range: None,
            y_range: None,
            aspect_ratio: Some(1.0),
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    pub fn set_y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_range = Some((min, max));
        self
    }

    /// Plot the first two state components of a trajectory as a line
    pub fn plot_trajectory(&mut self, traj: &Trajectory, style: &PathStyle) -> &mut Self {
        let x: Vec<f64> = traj.states.iter().map(|s| s[0]).collect();
        let y: Vec<f64> = traj.states.iter().map(|s| s[1]).collect();
        self.layers.push(Layer::Lines {
            x,
            y,
            color: style.color.clone(),
            width: style.line_width,
            caption: Some(style.caption.clone()),
        });
        self
    }

    /// Plot line segments, one per `(x0, y0, x1, y1)` tuple; used for
    /// search tree edges
    pub fn plot_segments(&mut self, segments: &[(f64, f64, f64, f64)], color: &str) -> &mut Self {
        for &(x0, y0, x1, y1) in segments {
            self.layers.push(Layer::Lines {
                x: vec![x0, x1],
                y: vec![y0, y1],
                color: color.to_string(),
                width: 1.0,
                caption: None,
            });
        }
        self
    }

    /// Plot a circle outline
    pub fn plot_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) -> &mut Self {
        let n = 64;
        let mut x = Vec::with_capacity(n + 1);
        let mut y = Vec::with_capacity(n + 1);
        for i in 0..=n {
            let a = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
            x.push(cx + radius * a.cos());
            y.push(cy + radius * a.sin());
        }
        self.layers.push(Layer::Lines {
            x,
            y,
            color: color.to_string(),
            width: 1.5,
            caption: None,
        });
        self
    }

    /// Plot an axis-aligned box outline
    pub fn plot_box(&mut self, x_min: f64, y_min: f64, x_max: f64, y_max: f64, color: &str) -> &mut Self {
        self.layers.push(Layer::Lines {
            x: vec![x_min, x_max, x_max, x_min, x_min],
            y: vec![y_min, y_min, y_max, y_max, y_min],
            color: color.to_string(),
            width: 1.5,
            caption: None,
        });
        self
    }

    pub fn plot_point(&mut self, x: f64, y: f64, style: &PointStyle) -> &mut Self {
        self.layers.push(Layer::Points {
            x: vec![x],
            y: vec![y],
            color: style.color.clone(),
            size: style.size,
            symbol: style.symbol,
            caption: Some(style.caption.clone()),
        });
        self
    }

    pub fn plot_start(&mut self, x: f64, y: f64) -> &mut Self {
        self.plot_point(x, y, &PointStyle::new(colors::START, "Start").with_size(1.5))
    }

    pub fn plot_goal(&mut self, x: f64, y: f64) -> &mut Self {
        self.plot_point(x, y, &PointStyle::new(colors::GOAL, "Goal").with_size(1.5))
    }

    /// Save the plot to a PNG file
    pub fn save_png(&self, path: &str, width: u32, height: u32) -> Result<(), String> {
        let mut figure = self.build();
        figure
            .save_to_png(path, width, height)
            .map_err(|e| e.to_string())
    }

    /// Open the plot in a gnuplot window
    pub fn show(&self) -> Result<(), String> {
        let mut figure = self.build();
        figure.show().map(|_| ()).map_err(|e| e.to_string())
    }

    fn build(&self) -> Figure {
        let mut figure = Figure::new();
        {
            let axes = figure.axes2d();
            if !self.title.is_empty() {
                axes.set_title(&self.title, &[]);
            }
            axes.set_x_label(&self.x_label, &[]);
            axes.set_y_label(&self.y_label, &[]);
            if let Some((min, max)) = self.x_range {
                axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
            }
            if let Some((min, max)) = self.y_range {
                axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
            }
            if let Some(ratio) = self.aspect_ratio {
                axes.set_aspect_ratio(AutoOption::Fix(ratio));
            }
            for layer in &self.layers {
                match layer {
                    Layer::Lines {
                        x,
                        y,
                        color,
                        width,
                        caption,
                    } => match caption {
                        Some(c) => {
                            axes.lines(x, y, &[Caption(c), Color(color.as_str()), LineWidth(*width)]);
                        }
                        None => {
                            axes.lines(x, y, &[Color(color.as_str()), LineWidth(*width)]);
                        }
                    },
                    Layer::Points {
                        x,
                        y,
                        color,
                        size,
                        symbol,
                        caption,
                    } => match caption {
                        Some(c) => {
                            axes.points(
                                x,
                                y,
                                &[
                                    Caption(c),
                                    Color(color.as_str()),
                                    PointSymbol(*symbol),
                                    PointSize(*size),
                                ],
                            );
                        }
                        None => {
                            axes.points(
                                x,
                                y,
                                &[Color(color.as_str()), PointSymbol(*symbol), PointSize(*size)],
                            );
                        }
                    },
                }
            }
        }
        figure
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}
