use crate::endpoints::{
    Money,
    academic_years::GetActiveAcademicYear,
    fee_assignments::{GetFeeAssignment, ListFeeAssignments, PlanType},
    parents::{GetParent, UpdateParent},
    payments::{GetPayment, InitiatePayment, ListPayments},
    students::{FindStudent, LinkStudent, ListLinkedStudents, UnlinkStudent},
};
use uuid::Uuid;

pub struct ParentRepository;

impl ParentRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn for_user(&self, user_id: Uuid) -> GetParent {
        GetParent::new(user_id)
    }

    pub fn update_profile(&self, parent_id: Uuid) -> UpdateParent {
        UpdateParent::new(parent_id)
    }
}

pub struct StudentRepository;

impl StudentRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn linked(&self, parent_id: Uuid) -> ListLinkedStudents {
        ListLinkedStudents::new(parent_id)
    }

    pub fn find_by_registration(&self, registration_number: impl Into<String>) -> FindStudent {
        FindStudent::new(registration_number)
    }

    pub fn link(&self, parent_id: Uuid, student_id: Uuid) -> LinkStudent {
        LinkStudent::new(parent_id, student_id)
    }

    pub fn unlink(&self, parent_id: Uuid, student_id: Uuid) -> UnlinkStudent {
        UnlinkStudent::new(parent_id, student_id)
    }
}

pub struct AcademicYearRepository;

impl AcademicYearRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn active(&self) -> GetActiveAcademicYear {
        GetActiveAcademicYear
    }
}

pub struct FeeAssignmentRepository;

impl FeeAssignmentRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn for_student(&self, student_id: Uuid, academic_year_id: Uuid) -> GetFeeAssignment {
        GetFeeAssignment::new(student_id, academic_year_id)
    }

    pub fn for_students(
        &self,
        student_ids: Vec<Uuid>,
        academic_year_id: Uuid,
    ) -> ListFeeAssignments {
        ListFeeAssignments::new(student_ids, academic_year_id)
    }
}

pub struct PaymentRepository;

impl PaymentRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn history(&self, student_id: Uuid) -> ListPayments {
        ListPayments::new(student_id)
    }

    pub fn get(&self, payment_id: impl Into<String>) -> GetPayment {
        GetPayment::new(payment_id)
    }

    pub fn initiate(
        &self,
        student_id: Uuid,
        amount: Money,
        phone_number: impl Into<String>,
        payment_type: PlanType,
    ) -> InitiatePayment {
        InitiatePayment::new(student_id, amount, phone_number.into(), payment_type)
    }
}
