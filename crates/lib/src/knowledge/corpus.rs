use super::{Category, Provision};

/// Title, explanatory text and category of every built-in provision.
const PROVISIONS: &[(&str, &str, Category)] = &[
    (
        "Right to Constitutional Remedies (Article 32)",
        "Guarantees the right to move the Supreme Court for enforcement of Fundamental Rights. The Supreme Court can issue writs like habeas corpus, mandamus, prohibition, quo warranto and certiorari. This is considered the 'heart and soul' of the Constitution.",
        Category::ConstitutionalRights,
    ),
    (
        "Right to Equality (Articles 14-18)",
        "Article 14 guarantees equality before law and equal protection of laws. Article 15 prohibits discrimination on grounds of religion, race, caste, sex, or place of birth. Article 16 ensures equality of opportunity in public employment. Article 17 abolishes untouchability. Article 18 abolishes titles except military or academic distinctions.",
        Category::ConstitutionalRights,
    ),
    (
        "Right to Freedom (Articles 19-22)",
        "Article 19 protects six freedoms: speech and expression, assembly, association, movement, residence, and profession. Article 20 provides protection against arbitrary conviction. Article 21 guarantees right to life and personal liberty. Article 22 provides protection against arrest and detention in certain cases.",
        Category::ConstitutionalRights,
    ),
    (
        "Right against Exploitation (Articles 23-24)",
        "Article 23 prohibits human trafficking and forced labor. Article 24 prohibits employment of children below 14 years in factories, mines, or other hazardous employment.",
        Category::ConstitutionalRights,
    ),
    (
        "Indian Penal Code - Basic Framework",
        "The IPC (1860) is the primary criminal code covering all substantive aspects of criminal law. It defines crimes and prescribes punishments for them, categorizing offenses against the body, property, public tranquility, state, etc.",
        Category::CriminalLaw,
    ),
    (
        "Criminal Procedure Code - FIR (Section 154)",
        "First Information Report (FIR) is the document prepared by police upon receiving information about a cognizable offense. Police are duty-bound to register FIR without conducting preliminary inquiry. Citizens can approach Superintendent of Police if police refuse to register FIR.",
        Category::CriminalProcedure,
    ),
    (
        "Criminal Procedure Code - Bail (Sections 436-450)",
        "Provisions governing bail in bailable and non-bailable offenses. In bailable offenses, bail is a matter of right. In non-bailable offenses, bail is discretionary. Courts consider factors like severity of offense, evidence strength, flight risk, and possibility of witness tampering.",
        Category::CriminalProcedure,
    ),
    (
        "Criminal Procedure Code - Trial Procedure",
        "Outlines procedures for criminal trials including summons trials, warrant trials, and summary trials. Establishes procedural safeguards like right to be defended, right to know the accusation, and right against self-incrimination.",
        Category::CriminalProcedure,
    ),
    (
        "Indian Penal Code - Theft (Section 378)",
        "Whoever, intending to take dishonestly any movable property out of the possession of any person without that person's consent, moves that property is said to commit theft. Punishment under Section 379 can extend to 3 years imprisonment, fine, or both.",
        Category::CriminalLaw,
    ),
    (
        "Indian Penal Code - Cheating (Section 415)",
        "Whoever, by deceiving any person, fraudulently or dishonestly induces the person to deliver any property or consent to the retention of property, or intentionally induces the person to do or omit anything which he would not do or omit if he were not so deceived, is said to 'cheat'. Punishment under Section 417 can extend to 1 year imprisonment, fine, or both.",
        Category::CriminalLaw,
    ),
    (
        "Civil Procedure Code - Overview",
        "The Civil Procedure Code, 1908 governs procedures for filing and defending civil suits. It regulates jurisdiction of courts, execution of decrees, appeals, reviews, and references. It also covers issues like attachment before judgment and temporary injunctions.",
        Category::CivilProcedure,
    ),
    (
        "Civil Procedure Code - Filing Suit (Order 4)",
        "Procedure for instituting civil suits through proper plaint filing in court of jurisdiction with appropriate court fees. The plaint must contain material facts, legal basis of claim, relief sought, and proper verification.",
        Category::CivilProcedure,
    ),
    (
        "Civil Procedure Code - Limitation (Section 3)",
        "Every suit instituted, appeal preferred, and application made after the prescribed period shall be dismissed, although limitation has not been set up as a defense. The Limitation Act, 1963 prescribes specific time periods for different types of suits.",
        Category::CivilProcedure,
    ),
    (
        "Civil Procedure Code - Summary Judgment (Order 13A)",
        "Allows courts to decide a claim without a full trial when there is no real prospect of success for the defending party or where there is no compelling reason for the case to proceed to trial.",
        Category::CivilProcedure,
    ),
    (
        "Hindu Marriage Act, 1955",
        "Governs marriage, separation, and divorce among Hindus. Section 5 outlines conditions for valid Hindu marriage. Section 13 provides grounds for divorce including adultery, cruelty, desertion, conversion, mental disorder, etc.",
        Category::FamilyLaw,
    ),
    (
        "Muslim Personal Law (Shariat) Application Act, 1937",
        "Applies personal law to Muslims in matters relating to marriage, succession, inheritance, and charities. Under this, various forms of Muslim marriages and divorces (like talaq, khula, etc.) are recognized.",
        Category::FamilyLaw,
    ),
    (
        "Special Marriage Act, 1954",
        "Provides for civil marriage irrespective of religion. Section 4 outlines conditions for marriage. Section 27 provides grounds for divorce. Marriage requires 30-day notice period and registration before Marriage Officer.",
        Category::FamilyLaw,
    ),
    (
        "Hindu Succession Act, 1956 (as amended)",
        "Governs succession and inheritance among Hindus. After 2005 amendment, daughters have equal coparcenary rights as sons in ancestral property. Section 8 deals with succession for males, and Section 15 for females.",
        Category::FamilyLaw,
    ),
    (
        "Indian Contract Act - Elements of Valid Contract (Section 10)",
        "All agreements are contracts if made by free consent of parties competent to contract, for lawful consideration and with lawful object, and are not expressly declared void. Essential elements include offer, acceptance, consideration, capacity, free consent, lawful object.",
        Category::ContractLaw,
    ),
    (
        "Indian Contract Act - Breach of Contract (Section 73)",
        "When a contract is broken, the party suffering from breach is entitled to compensation for loss or damage naturally arising from the breach. Compensation not given for remote or indirect loss or damage.",
        Category::ContractLaw,
    ),
    (
        "Sale of Goods Act, 1930",
        "Governs contracts relating to sale of goods. Section 4 defines sale as transfer of ownership for price. Section 16 implies condition as to merchantable quality. Provides remedies for breach including damages, specific performance, rejection, etc.",
        Category::CommercialLaw,
    ),
    (
        "Companies Act, 2013",
        "Comprehensive legislation governing company formation, management, dissolution. Classifies companies as private, public, OPC, etc. Establishes corporate governance norms and protects shareholder interests. NCLT/NCLAT established for corporate disputes.",
        Category::CorporateLaw,
    ),
    (
        "Transfer of Property Act, 1882",
        "Regulates transfer of property between living persons. Section 5 defines 'transfer of property'. Covers various modes of transfer like sale, mortgage, lease, gift, etc. Section 54 deals with sale, requiring registered instrument for immovable property worth over Rs. 100.",
        Category::PropertyLaw,
    ),
    (
        "Registration Act, 1908",
        "Mandates registration of certain documents related to immovable property. Section 17 lists compulsorily registrable documents including sale deeds, gift deeds, mortgage deeds, lease deeds exceeding one year.",
        Category::PropertyLaw,
    ),
    (
        "Indian Easements Act, 1882",
        "Governs easement rights (right to use another's property). Defines easements as right to enjoyment of another's land for specific purpose. Covers acquisition, extinction of easements. Examples include right of way, right to light.",
        Category::PropertyLaw,
    ),
    (
        "Consumer Protection Act, 2019",
        "Establishes Consumer Disputes Redressal Commissions at district (up to Rs 1 crore), state (Rs 1-10 crore), and national levels (above Rs 10 crore). Covers product liability, unfair trade practices, and misleading advertisements. Provides for mediation, class action, simplified procedures.",
        Category::ConsumerLaw,
    ),
    (
        "Industrial Disputes Act, 1947",
        "Governs employer-employee relations in industrial establishments. Provides machinery for investigation and settlement of industrial disputes through works committees, conciliation officers, labor courts, tribunals. Regulates layoffs, retrenchment, closure.",
        Category::LaborLaw,
    ),
    (
        "Employees' Provident Funds Act, 1952",
        "Provides for compulsory contributory provident fund for employees. Applicable to establishments with 20+ employees. Employer and employee both contribute 12% of basic wages. Administered by EPFO.",
        Category::LaborLaw,
    ),
    (
        "Patents Act, 1970",
        "Governs patent protection in India. Patents granted for inventions that are novel, involve inventive step, and have industrial application. Patent term is 20 years. Section 3 lists non-patentable subject matter.",
        Category::IntellectualProperty,
    ),
    (
        "Copyright Act, 1957",
        "Protects literary, dramatic, musical, artistic works, films, sound recordings. Copyright exists for lifetime of author plus 60 years. Provides exclusive rights to reproduce, publish, perform, translate, adapt, etc.",
        Category::IntellectualProperty,
    ),
    (
        "Public Interest Litigation",
        "Legal action initiated in court for protection of public interest. Can be filed by any public-spirited individual or organization for enforcement of constitutional rights of disadvantaged groups or matters of public importance. Relaxed rules of standing and procedure.",
        Category::Litigation,
    ),
    (
        "Alternative Dispute Resolution",
        "Includes arbitration, mediation, conciliation, negotiation. Arbitration governed by Arbitration and Conciliation Act, 1996. Provides for binding decisions outside court. Mediation centers established in many courts for amicable settlement.",
        Category::Litigation,
    ),
    (
        "Legal Services Authorities Act, 1987",
        "Establishes framework for free legal aid to weaker sections. NALSA at national level, SLSAs at state level, DLSAs at district level. Organizes Lok Adalats for amicable settlement of disputes.",
        Category::LegalAid,
    ),
    (
        "Information Technology Act, 2000",
        "Legal framework for electronic governance and e-commerce. Recognizes electronic records and signatures. Defines cybercrimes like hacking, identity theft, cyber terrorism. Establishes adjudication process for cyber disputes.",
        Category::CyberLaw,
    ),
    (
        "Prevention of Money Laundering Act, 2002",
        "Prevents money-laundering and confiscation of property derived from it. Imposes obligation on banking companies, financial institutions to maintain records, verify identity of clients, report suspicious transactions.",
        Category::FinancialLaw,
    ),
    (
        "Right to Information Act, 2005",
        "Promotes transparency in government functioning. Citizens can request information from public authorities. Establishes Information Commissions for appeals. Exemptions under Section 8 include national security, privacy, etc.",
        Category::AdministrativeLaw,
    ),
];

/// Returns the built-in corpus of Indian legal provisions, in a stable order.
pub fn legal_corpus() -> Vec<Provision> {
    PROVISIONS
        .iter()
        .map(|(provision, content, category)| Provision::new(provision, content, *category))
        .collect()
}
