//! Sample content shared by tests across modules.

use std::fs;

use tempfile::TempDir;

use super::{CASE_STUDIES_FILE, ContentError, ContentRegistry, PROFILE_FILE, PROJECTS_FILE};

/// Minimal valid site: two projects, three case studies (one hidden).
pub fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("content");
    let public = dir.path().join("public");
    fs::create_dir_all(&content).unwrap();
    fs::create_dir_all(public.join("projects")).unwrap();
    fs::create_dir_all(public.join("image")).unwrap();
    fs::create_dir_all(public.join("codes/kd-trees")).unwrap();

    for asset in [
        "image/ME.jpg",
        "projects/CEVI.jpg",
        "projects/CV.png",
        "Mini_Project_Report.pdf",
        "Enhanced Optical Flow.pdf",
        "codes/kd-trees/kd-heap.py",
        "Jane_CV.pdf",
    ] {
        fs::write(public.join(asset), b"x").unwrap();
    }

    fs::write(
        content.join(PROFILE_FILE),
        r#"
[about]
name = "Jane Doe"
location = "Pune, India"
paragraphs = ["I study **computer vision**."]
highlights = ["computer vision"]
portrait = "/image/ME.jpg"
github = "https://github.com/jane"
resume = "/Jane_CV.pdf"

[[education]]
degree = "Bachelor of Engineering in Computer Science"
institution = "KLE Technological University"
period = "2022 - 2026"
details = ["CGPA: 9.66"]

[[education]]
degree = "Higher Secondary Graduation"
institution = "Mount Litera Zee School, Goa"

[contact]
message = "My inbox is open."
email = "jane@example.com"

[[social]]
label = "GitHub"
url = "https://github.com/jane"

[domain]
body = "domain.md"
"#,
    )
    .unwrap();
    fs::write(content.join("domain.md"), "## Hardware\n\nSilicon.\n").unwrap();

    fs::write(
        content.join(PROJECTS_FILE),
        r#"
[[project]]
slug = "CEVI"
title = "Underwater Image Restoration"
description = "Attenuation coefficients."
image = "/projects/CEVI.jpg"
paper = "/Mini_Project_Report.pdf"
body = "cevi.md"

[[project]]
title = "Optical Flow Vehicle Tracking"
description = "Lucas-Kanade with motion saliency."
image = "/projects/CV.png"
paper = "/Enhanced%20Optical%20Flow.pdf"
repo = "https://github.com/jane/optical-flow"
"#,
    )
    .unwrap();
    fs::write(
        content.join("cevi.md"),
        "## Results\n\n![patches](/projects/CEVI.jpg)\n\n[Back](/)\n",
    )
    .unwrap();

    fs::write(
        content.join(CASE_STUDIES_FILE),
        r#"
[intro]
title = "Software Engineering Case Studies"
paragraphs = ["A reconstruction, not a blueprint."]

[[case_study]]
slug = "kd-trees"
title = "Kd-trees in Recognition"
description = "Spatial search."
body = "kd-trees.md"
github = "https://github.com/jane/portfolio/tree/main/public/codes/kd-trees"
references = ["Bentley, J. L. (1975). Multidimensional binary search trees."]
code = ["/codes/kd-trees/kd-heap.py"]

[[case_study]]
slug = "icloud-sync"
title = "iCloud Sync"
description = "Draft."
body = "missing-on-purpose.md"
hidden = true

[[case_study]]
slug = "xcode-build"
title = "Topological Sort for Xcode"
description = "Build ordering."
body = "xcode.md"
"#,
    )
    .unwrap();
    fs::write(
        content.join("kd-trees.md"),
        "## Overview\n\nSee [the index](/case-studies/) and [top](#overview).\n",
    )
    .unwrap();
    fs::write(content.join("xcode.md"), "Kahn's algorithm.\n").unwrap();

    dir
}

pub fn load_fixture(dir: &TempDir) -> Result<ContentRegistry, ContentError> {
    ContentRegistry::load(&dir.path().join("content"), &dir.path().join("public"))
}
