//! Built-in SDLC process tree
//!
//! Six lifecycle phases (level 1) refined down to concrete activities
//! (level 5). The root carries no level.

use crate::node::TreeNode;

/// Name of the built-in root
pub const DEFAULT_ROOT_NAME: &str = "SDLC Process";

fn step(name: &str, level: u32, children: impl IntoIterator<Item = TreeNode>) -> TreeNode {
    TreeNode::new(name).with_level(level).with_children(children)
}

fn activity(name: &str) -> TreeNode {
    TreeNode::new(name).with_level(5)
}

/// A phase refined along a single chain down to two activities
fn phase(names: [&str; 4], activities: [&str; 2]) -> TreeNode {
    let [phase, area, process, task] = names;
    step(
        phase,
        1,
        [step(
            area,
            2,
            [step(
                process,
                3,
                [step(task, 4, activities.map(activity))],
            )],
        )],
    )
}

/// The tree shown when no share link is loaded
#[must_use]
pub fn default_tree() -> TreeNode {
    let planning = step(
        "Planning",
        1,
        [step(
            "Requirements Gathering",
            2,
            [
                step(
                    "Stakeholder Analysis",
                    3,
                    [
                        step(
                            "Identify Key Stakeholders",
                            4,
                            [
                                activity("Internal Stakeholders"),
                                activity("External Stakeholders"),
                            ],
                        ),
                        step(
                            "Requirements Documentation",
                            4,
                            [
                                activity("Functional Requirements"),
                                activity("Non-Functional Requirements"),
                            ],
                        ),
                    ],
                ),
                step(
                    "Feasibility Study",
                    3,
                    [step(
                        "Technical Feasibility",
                        4,
                        [
                            activity("Technology Assessment"),
                            activity("Resource Evaluation"),
                        ],
                    )],
                ),
            ],
        )],
    );

    TreeNode::new(DEFAULT_ROOT_NAME).with_children([
        planning,
        phase(
            ["Design", "System Architecture", "High-Level Design", "Component Design"],
            ["Module Specification", "Interface Design"],
        ),
        phase(
            ["Implementation", "Coding", "Development", "Code Implementation"],
            ["Unit Testing", "Code Review"],
        ),
        phase(
            ["Testing", "Quality Assurance", "Testing Phases", "Test Planning"],
            ["Test Cases", "Test Environment"],
        ),
        phase(
            ["Deployment", "Release Management", "Deployment Planning", "Release Strategy"],
            ["Rollout Plan", "Rollback Plan"],
        ),
        phase(
            ["Maintenance", "Operations", "Support", "Monitoring"],
            ["Performance Tracking", "Issue Resolution"],
        ),
    ])
}
