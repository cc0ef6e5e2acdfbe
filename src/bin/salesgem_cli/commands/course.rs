// ABOUTME: Course management commands for salesgem-cli
// ABOUTME: Registers courses by name and lists the registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use salesgem::courses::CourseService;
use salesgem::errors::AppResult;
use salesgem::models::Course;

/// Register a course, reusing the oldest one with the same name
pub async fn create(courses: &CourseService, issuer: &str, name: &str) -> AppResult<()> {
    let course = courses.get_or_create(issuer, name).await?;
    println!("Course ready:");
    print_course(&course);
    Ok(())
}

/// List all registered courses
pub async fn list(courses: &CourseService, issuer: &str) -> AppResult<()> {
    let entries = courses.list_all(issuer).await?;

    if entries.is_empty() {
        println!("No courses registered");
        return Ok(());
    }

    println!("{} course(s):", entries.len());
    for course in &entries {
        print_course(course);
    }
    Ok(())
}

fn print_course(course: &Course) {
    println!(
        "  {}  {}  {} student(s)  {}",
        course.id,
        course.name,
        course.student_count,
        course.course_date.format("%Y-%m-%d")
    );
}
