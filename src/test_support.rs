//! Shared fixtures for unit tests.

use crate::pipeline::data::{
    CandidateRecord, EducationLevel, Gender, RawTable, RecruitmentStrategy,
};
use crate::pipeline::forest::{DecisionTree, RandomForest};

pub const REFERENCE_CSV: &str = "\
Age,Gender,EducationLevel,ExperienceYears,PreviousCompanies,DistanceFromCompany,InterviewScore,SkillScore,PersonalityScore,RecruitmentStrategy,HiringDecision
26,1,2,0,3,26.78,48,78,91,1,1
39,1,4,12,3,25.18,35,68,80,2,1
48,0,2,3,2,9.92,20,67,13,2,0
34,1,2,5,2,6.41,36,27,70,3,0
30,0,1,6,1,43.11,23,52,85,2,0
51,1,1,8,4,33.47,87,14,24,1,1
23,0,3,2,5,15.24,61,92,46,1,1
44,0,4,20,1,4.86,75,81,58,3,1
58,1,3,31,2,47.03,19,39,62,2,0
35,0,2,9,3,12.55,57,60,33,3,0
41,1,1,14,0,88.12,92,71,77,1,1
29,0,1,1,4,21.65,44,18,51,2,0
";

/// Reference table parsed the same way uploaded files are.
pub fn reference_table() -> RawTable {
    crate::pipeline::batch::read_table(REFERENCE_CSV.as_bytes()).expect("fixture parses")
}

/// The worked example candidate.
pub fn sample_candidate() -> CandidateRecord {
    CandidateRecord {
        age: 30,
        gender: Gender::Male,
        education: EducationLevel::BachelorType1,
        experience_years: 5,
        previous_companies: 2,
        distance_from_company: 10.0,
        interview_score: 70,
        skill_score: 75,
        personality_score: 80,
        recruitment_strategy: RecruitmentStrategy::Moderate,
    }
}

/// Depth-one tree: left leaf below or at `threshold`, right leaf above.
pub fn stump(feature: i64, threshold: f64, left: [f64; 2], right: [f64; 2]) -> DecisionTree {
    DecisionTree {
        children_left: vec![1, -1, -1],
        children_right: vec![2, -1, -1],
        feature: vec![feature, -2, -2],
        threshold: vec![threshold, -2.0, -2.0],
        value: vec![
            vec![left[0] + right[0], left[1] + right[1]],
            left.to_vec(),
            right.to_vec(),
        ],
    }
}

/// Small forest over the 11 transformed candidate features.
pub fn sample_forest() -> RandomForest {
    let depth_two = DecisionTree {
        children_left: vec![1, 2, -1, -1, -1],
        children_right: vec![4, 3, -1, -1, -1],
        // root: SkillScore, then EducationLevel
        feature: vec![8, 10, -2, -2, -2],
        threshold: vec![0.2, 2.5, -2.0, -2.0, -2.0],
        value: vec![
            vec![20.0, 20.0],
            vec![15.0, 5.0],
            vec![12.0, 1.0],
            vec![3.0, 4.0],
            vec![5.0, 15.0],
        ],
    };

    RandomForest {
        classes: vec![0, 1],
        n_features: 11,
        trees: vec![
            stump(7, 0.0, [8.0, 2.0], [2.0, 8.0]),
            depth_two,
            stump(9, -0.5, [6.0, 1.0], [3.0, 5.0]),
        ],
    }
}
